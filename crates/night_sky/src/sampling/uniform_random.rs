//! Uniform random position sampling strategy.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{PositionSampling, SampleRegion};

/// Uniform i.i.d. random sampling over a rectangular domain `[0, w) x [0, h)`.
#[derive(Debug, Clone)]
pub struct UniformRandomSampling {
    /// Number of candidate points to generate.
    pub count: usize,
}

impl UniformRandomSampling {
    /// Create a new uniform random sampler that generates `count` points.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Sample `count` points from an arbitrary region.
    pub fn generate_in(&self, region: SampleRegion, rng: &mut dyn RngCore) -> Vec<Vec2> {
        if self.count == 0 || region.is_empty() {
            return Vec::new();
        }

        (0..self.count).map(|_| region.sample(rng)).collect()
    }
}

impl PositionSampling for UniformRandomSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let region = SampleRegion::from_extent(Vec2::from(domain_extent));
        self.generate_in(region, rng)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}
