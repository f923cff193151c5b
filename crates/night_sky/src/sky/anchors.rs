//! Separated anchor star placement.
//!
//! Anchors are drawn from a horizontally narrow, vertically tall band in the middle of the
//! world and must keep a minimum distance from each other. Placement uses
//! [`RejectionSampling`] with a bounded draw budget per anchor.
use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec2;
use rand::RngCore;

use crate::error::Result;
use crate::events::{EventSink, SkyEvent};
use crate::sampling::rejection::DEFAULT_MAX_ATTEMPTS;
use crate::sampling::{rand_range, RejectionSampling, SampleRegion};
use crate::sky::{AnchorStar, ANCHOR_BRIGHTNESS};

/// Horizontal band as fractions of the world width.
pub const ANCHOR_BAND_X: Range<f32> = 0.4..0.6;
/// Distance kept clear at the top and bottom of the world.
pub const ANCHOR_MARGIN_Y: f32 = 200.0;

pub const ANCHOR_SIZE: Range<f32> = 12.0..24.0;
pub const ANCHOR_GLOW_SIZE: Range<f32> = 40.0..60.0;
pub const ANCHOR_TWINKLE_SPEED: Range<f32> = 0.01..0.04;

/// Candidate region for anchors in a world of the given extent.
///
/// May be empty for small worlds (height <= 400); placement then fails with
/// [`crate::error::Error::InvalidConfig`].
pub fn anchor_region(world_extent: Vec2) -> SampleRegion {
    SampleRegion::new(
        Vec2::new(world_extent.x * ANCHOR_BAND_X.start, ANCHOR_MARGIN_Y),
        Vec2::new(
            world_extent.x * ANCHOR_BAND_X.end,
            world_extent.y - ANCHOR_MARGIN_Y,
        ),
    )
}

/// Place `count` anchors with pairwise distance >= `min_separation`.
pub fn place_anchors(
    count: usize,
    world_extent: Vec2,
    min_separation: f32,
    rng: &mut dyn RngCore,
) -> Result<Vec<AnchorStar>> {
    place_anchors_with(
        count,
        world_extent,
        min_separation,
        DEFAULT_MAX_ATTEMPTS,
        rng,
        &mut (),
    )
}

/// Like [`place_anchors`] with an explicit per-anchor draw budget, emitting
/// [`SkyEvent::AnchorPlaced`] for each accepted anchor.
pub fn place_anchors_with(
    count: usize,
    world_extent: Vec2,
    min_separation: f32,
    max_attempts: usize,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<Vec<AnchorStar>> {
    let sampling = RejectionSampling::new(count, min_separation).with_max_attempts(max_attempts);
    let accepted = sampling.try_generate_detailed(anchor_region(world_extent), rng)?;

    let mut anchors = Vec::with_capacity(accepted.len());
    for (index, sample) in accepted.into_iter().enumerate() {
        sink.send(SkyEvent::AnchorPlaced {
            index,
            position: sample.position,
            attempts: sample.attempts,
        });
        anchors.push(AnchorStar {
            index,
            position: sample.position,
            size: rand_range(rng, ANCHOR_SIZE.start, ANCHOR_SIZE.end),
            brightness: ANCHOR_BRIGHTNESS,
            glow_size: rand_range(rng, ANCHOR_GLOW_SIZE.start, ANCHOR_GLOW_SIZE.end),
            twinkle_speed: rand_range(rng, ANCHOR_TWINKLE_SPEED.start, ANCHOR_TWINKLE_SPEED.end),
            phase: rand_range(rng, 0.0, TAU),
        });
    }

    Ok(anchors)
}
