//! Scene assembly: builds every sky layer from a [`SkyConfig`] and owns the reveal state.
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::config::SkyConfig;
use crate::error::Result;
use crate::events::{EventSink, SkyEvent};
use crate::reveal::{RevealTracker, RevealUpdate};
use crate::sky::anchors::place_anchors_with;
use crate::sky::companion::pair_companions;
use crate::sky::field::{generate_stars, generate_swirls};
use crate::sky::{AnchorStar, AnchoredCompanion, Companion, StarPoint, SwirlPoint};

/// A generated night sky plus the per-anchor reveal state.
///
/// Layers are immutable after construction. [`NightSky::tick`] is the only mutator.
#[derive(Debug, Clone)]
pub struct NightSky {
    config: SkyConfig,
    stars: Vec<StarPoint>,
    swirls: Vec<SwirlPoint>,
    pairs: Vec<AnchoredCompanion>,
    tracker: RevealTracker,
    camera: Vec2,
}

impl NightSky {
    /// Heading shown above [`NightSky::status_line`].
    pub const TITLE: &'static str = "The Star-Filled Experience";

    /// Build a sky with randomness from `config.sky.seed`, or an unseeded source when absent.
    pub fn from_config(config: SkyConfig) -> Result<Self> {
        let seed = config.sky.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    pub fn new(config: SkyConfig, rng: &mut dyn RngCore) -> Result<Self> {
        Self::new_with_events(config, rng, &mut ())
    }

    pub fn new_with_events(
        config: SkyConfig,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        config.validate()?;

        let extent = config.world_extent();
        let sky = &config.sky;

        let stars = generate_stars(sky.star_count, extent, rng);
        let swirls = generate_swirls(sky.swirl_count, extent, rng);
        let anchors = place_anchors_with(
            sky.anchor_count,
            extent,
            sky.min_separation,
            sky.max_attempts,
            rng,
            sink,
        )?;
        let kinds = sky.companion_kinds();
        let pairs = pair_companions(&anchors, &kinds, sky.companion_offset)?;

        info!(
            "Night sky built: stars={} swirls={} anchors={}",
            stars.len(),
            swirls.len(),
            pairs.len()
        );
        sink.send(SkyEvent::SkyBuilt {
            stars: stars.len(),
            swirls: swirls.len(),
            anchors: pairs.len(),
        });

        let tracker = RevealTracker::new(sky.reveal_radius);
        Ok(Self {
            config,
            stars,
            swirls,
            pairs,
            tracker,
            camera: Vec2::ZERO,
        })
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn world_extent(&self) -> Vec2 {
        self.config.world_extent()
    }

    pub fn stars(&self) -> &[StarPoint] {
        &self.stars
    }

    pub fn swirls(&self) -> &[SwirlPoint] {
        &self.swirls
    }

    pub fn pairs(&self) -> &[AnchoredCompanion] {
        &self.pairs
    }

    pub fn anchors(&self) -> impl ExactSizeIterator<Item = &AnchorStar> + '_ {
        self.pairs.iter().map(|p| &p.anchor)
    }

    pub fn companions(&self) -> impl ExactSizeIterator<Item = &Companion> + '_ {
        self.pairs.iter().map(|p| &p.companion)
    }

    pub fn tracker(&self) -> &RevealTracker {
        &self.tracker
    }

    /// Camera position supplied by the last [`NightSky::tick`].
    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Advance one frame: store the camera and evaluate the agent against every anchor.
    pub fn tick(&mut self, agent: Option<Vec2>, camera: Vec2) -> RevealUpdate {
        self.tick_with_events(agent, camera, &mut ())
    }

    pub fn tick_with_events(
        &mut self,
        agent: Option<Vec2>,
        camera: Vec2,
        sink: &mut dyn EventSink,
    ) -> RevealUpdate {
        self.camera = camera;
        self.tracker
            .evaluate_positions(agent, self.pairs.iter().map(|p| p.anchor.position), sink)
    }

    /// Companions to draw this frame: those whose anchor is currently near.
    pub fn visible_companions(&self) -> impl Iterator<Item = &Companion> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(i, _)| self.tracker.is_near(*i))
            .map(|(_, p)| &p.companion)
    }

    /// HUD line with the configured camera lerp and integer agent/camera coordinates.
    pub fn status_line(&self, agent: Vec2) -> String {
        format!(
            "camLerp(JSON): {}  Player: {},{}  Cam: {},{}",
            self.config.camera.lerp,
            int32(agent.x),
            int32(agent.y),
            int32(self.camera.x),
            int32(self.camera.y)
        )
    }
}

/// Truncate toward zero and wrap into `i32`, the way a JS `x | 0` does.
#[inline]
fn int32(v: f32) -> i32 {
    v as i64 as i32
}
