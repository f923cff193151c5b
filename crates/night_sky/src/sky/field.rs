//! Uniform random star and swirl populations covering the whole world.
use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec2;
use rand::RngCore;

use crate::sampling::{rand_range, PositionSampling, UniformRandomSampling};
use crate::sky::{StarPoint, SwirlPoint};

pub const STAR_SIZE: Range<f32> = 2.0..6.0;
pub const STAR_BRIGHTNESS: Range<f32> = 200.0..255.0;
pub const STAR_GLOW_SIZE: Range<f32> = 8.0..20.0;
pub const STAR_TWINKLE_SPEED: Range<f32> = 0.02..0.08;

pub const SWIRL_RADIUS: Range<f32> = 8.0..20.0;
pub const SWIRL_OPACITY: Range<f32> = 40.0..100.0;
pub const SWIRL_SPEED: Range<f32> = 0.01..0.025;
pub const SWIRL_TIGHTNESS: Range<f32> = 8.0..14.0;

#[inline]
fn draw(rng: &mut dyn RngCore, range: Range<f32>) -> f32 {
    rand_range(rng, range.start, range.end)
}

fn world_positions(count: usize, world_extent: Vec2, rng: &mut dyn RngCore) -> Vec<Vec2> {
    UniformRandomSampling::new(count)
        .generate(world_extent.into(), rng)
        .into_iter()
        .map(Vec2::from)
        .collect()
}

/// Generate `count` background stars over `[0, w) x [0, h)`.
pub fn generate_stars(count: usize, world_extent: Vec2, rng: &mut dyn RngCore) -> Vec<StarPoint> {
    let positions = world_positions(count, world_extent, rng);

    positions
        .into_iter()
        .map(|position| StarPoint {
            position,
            size: draw(rng, STAR_SIZE),
            brightness: draw(rng, STAR_BRIGHTNESS),
            glow_size: draw(rng, STAR_GLOW_SIZE),
            twinkle_speed: draw(rng, STAR_TWINKLE_SPEED),
            phase: draw(rng, 0.0..TAU),
        })
        .collect()
}

/// Generate `count` atmosphere swirls over `[0, w) x [0, h)`.
pub fn generate_swirls(count: usize, world_extent: Vec2, rng: &mut dyn RngCore) -> Vec<SwirlPoint> {
    let positions = world_positions(count, world_extent, rng);

    positions
        .into_iter()
        .map(|position| SwirlPoint {
            position,
            radius: draw(rng, SWIRL_RADIUS),
            opacity: draw(rng, SWIRL_OPACITY),
            speed: draw(rng, SWIRL_SPEED),
            rotation: draw(rng, 0.0..TAU),
            tightness: draw(rng, SWIRL_TIGHTNESS),
        })
        .collect()
}
