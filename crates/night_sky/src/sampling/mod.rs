//! Sampling strategies for generating candidate positions in a 2D domain.
//!
//! Domains here are corner-anchored: an extent `(w, h)` covers `[0, w) x [0, h)`, matching the
//! screen-style coordinates the sky is laid out in (y grows downwards).
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

pub mod rejection;
pub mod uniform_random;

pub use rejection::{AcceptedSample, RejectionSampling};
pub use uniform_random::UniformRandomSampling;

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits so every result is exactly representable and strictly below 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// Uniform float in `[lo, hi)`. Returns `lo` for an empty or inverted range.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    (lo + rand01(rng) * (hi - lo)).min(next_down(hi))
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

/// Half-open axis-aligned rectangle `[min, max)` that candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SampleRegion {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Region covering `[0, w) x [0, h)`.
    pub fn from_extent(extent: Vec2) -> Self {
        Self::new(Vec2::ZERO, extent)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn area(&self) -> f32 {
        let size = self.size();
        if self.is_empty() {
            0.0
        } else {
            size.x * size.y
        }
    }

    /// True when the region has no interior (zero, negative or non-finite size).
    pub fn is_empty(&self) -> bool {
        let size = self.size();
        !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Draw a uniform point inside the region.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Vec2 {
        let x = rand_range(rng, self.min.x, self.max.x);
        let y = rand_range(rng, self.min.y, self.max.y);
        Vec2::new(x, y)
    }
}
