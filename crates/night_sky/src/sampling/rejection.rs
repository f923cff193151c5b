//! Bounded rejection sampling with a pairwise minimum-distance constraint.
use glam::Vec2;
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::sampling::SampleRegion;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Places a fixed number of points so that no two are closer than `min_separation`.
///
/// Each point is drawn uniformly from the region and rejected while it is strictly closer than
/// `min_separation` to any previously accepted point. Points are accepted in order, so the
/// returned sequence is the acceptance order.
///
/// Sampling succeeds with high probability only when the region is large relative to
/// `count` and `min_separation`; each point gets at most `max_attempts` draws.
#[derive(Debug, Clone)]
pub struct RejectionSampling {
    /// Number of points to place.
    pub count: usize,
    /// Minimum pairwise distance in world units.
    pub min_separation: f32,
    /// Draw budget per point.
    pub max_attempts: usize,
}

/// A point accepted by [`RejectionSampling`] with the number of draws it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedSample {
    pub position: Vec2,
    pub attempts: usize,
}

impl RejectionSampling {
    pub fn new(count: usize, min_separation: f32) -> Self {
        Self {
            count,
            min_separation,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self, region: &SampleRegion) -> Result<()> {
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_separation must be finite and >= 0 (got {})",
                self.min_separation
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        if self.count > 0 && region.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "sample region is empty: min {:?}, max {:?}",
                region.min, region.max
            )));
        }
        Ok(())
    }

    /// Place all points, or fail with [`Error::PlacementExhausted`] naming the first point
    /// whose draw budget ran out.
    pub fn try_generate(&self, region: SampleRegion, rng: &mut dyn RngCore) -> Result<Vec<Vec2>> {
        Ok(self
            .try_generate_detailed(region, rng)?
            .into_iter()
            .map(|s| s.position)
            .collect())
    }

    /// Like [`RejectionSampling::try_generate`], also reporting the draws used per point.
    pub fn try_generate_detailed(
        &self,
        region: SampleRegion,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<AcceptedSample>> {
        self.validate(&region)?;

        let min_d2 = self.min_separation * self.min_separation;
        let mut accepted: Vec<AcceptedSample> = Vec::with_capacity(self.count);

        for index in 0..self.count {
            let mut placed = None;
            for attempt in 1..=self.max_attempts {
                let candidate = region.sample(rng);
                if is_separated(candidate, &accepted, min_d2) {
                    placed = Some(AcceptedSample {
                        position: candidate,
                        attempts: attempt,
                    });
                    break;
                }
            }

            let Some(sample) = placed else {
                warn!(
                    "Rejection sampling exhausted {} attempts for point {} of {}",
                    self.max_attempts, index, self.count
                );
                return Err(Error::PlacementExhausted {
                    index,
                    attempts: self.max_attempts,
                    min_separation: self.min_separation,
                });
            };

            debug!(
                index,
                attempts = sample.attempts,
                x = sample.position.x,
                y = sample.position.y,
                "accepted separated sample"
            );
            accepted.push(sample);
        }

        Ok(accepted)
    }
}

#[inline]
fn is_separated(candidate: Vec2, accepted: &[AcceptedSample], min_d2: f32) -> bool {
    accepted
        .iter()
        .all(|s| candidate.distance_squared(s.position) >= min_d2)
}
