//! Scene configuration loaded from a JSON payload.
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "world": { "w": 2400, "h": 1600, "bg": [235, 235, 235], "gridStep": 160 },
//!   "camera": { "lerp": 0.12 },
//!   "obstacles": [],
//!   "sky": { "anchorCount": 5, "minSeparation": 300, "revealRadius": 50 }
//! }
//! ```
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reveal::DEFAULT_REVEAL_RADIUS;
use crate::sampling::rejection::DEFAULT_MAX_ATTEMPTS;
use crate::sky::anchors::anchor_region;
use crate::sky::companion::DEFAULT_COMPANION_OFFSET;
use crate::sky::CompanionKind;

pub const DEFAULT_SCHEMA_VERSION: u32 = 1;

/// Root configuration for a [`crate::scene::NightSky`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkyConfig {
    pub schema_version: u32,
    pub world: WorldConfig,
    pub camera: CameraConfig,
    /// Passed through untouched; nothing in this crate interprets obstacles.
    pub obstacles: Vec<serde_json::Value>,
    pub sky: GenerationConfig,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            schema_version: DEFAULT_SCHEMA_VERSION,
            world: WorldConfig::default(),
            camera: CameraConfig::default(),
            obstacles: Vec::new(),
            sky: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    pub w: f32,
    pub h: f32,
    /// Background clear color (RGB).
    pub bg: [u8; 3],
    pub grid_step: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            w: 2400.0,
            h: 1600.0,
            bg: [235, 235, 235],
            grid_step: 160.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Fraction of the remaining distance the camera closes per frame.
    pub lerp: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { lerp: 0.12 }
    }
}

/// Generation parameters for the sky layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub star_count: usize,
    pub swirl_count: usize,
    pub anchor_count: usize,
    pub min_separation: f32,
    pub reveal_radius: f32,
    pub companion_offset: f32,
    /// Candidate draws allowed per anchor before placement fails.
    pub max_attempts: usize,
    /// Companion kind per anchor. When set its length must equal `anchor_count`; when absent
    /// the default sequence is repeated to cover every anchor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companions: Option<Vec<CompanionKind>>,
    /// RNG seed; `None` lets the host pick an unseeded source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            star_count: 500,
            swirl_count: 80,
            anchor_count: CompanionKind::DEFAULT_SEQUENCE.len(),
            min_separation: 300.0,
            reveal_radius: DEFAULT_REVEAL_RADIUS,
            companion_offset: DEFAULT_COMPANION_OFFSET,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            companions: None,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Companion kind for each anchor, in anchor order.
    pub fn companion_kinds(&self) -> Vec<CompanionKind> {
        match &self.companions {
            Some(kinds) => kinds.clone(),
            None => CompanionKind::DEFAULT_SEQUENCE
                .iter()
                .copied()
                .cycle()
                .take(self.anchor_count)
                .collect(),
        }
    }
}

impl SkyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn world_extent(&self) -> Vec2 {
        Vec2::new(self.world.w, self.world.h)
    }

    /// Sets the world size.
    pub fn with_world_extent(mut self, extent: Vec2) -> Self {
        self.world.w = extent.x;
        self.world.h = extent.y;
        self
    }

    /// Sets the camera lerp factor.
    pub fn with_camera_lerp(mut self, lerp: f32) -> Self {
        self.camera.lerp = lerp;
        self
    }

    pub fn with_star_count(mut self, count: usize) -> Self {
        self.sky.star_count = count;
        self
    }

    pub fn with_swirl_count(mut self, count: usize) -> Self {
        self.sky.swirl_count = count;
        self
    }

    /// Sets anchors and their companion kinds together so the counts stay equal.
    pub fn with_companions(mut self, kinds: Vec<CompanionKind>) -> Self {
        self.sky.anchor_count = kinds.len();
        self.sky.companions = Some(kinds);
        self
    }

    pub fn with_min_separation(mut self, min_separation: f32) -> Self {
        self.sky.min_separation = min_separation;
        self
    }

    pub fn with_reveal_radius(mut self, radius: f32) -> Self {
        self.sky.reveal_radius = radius;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.sky.max_attempts = max_attempts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sky.seed = Some(seed);
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        if !(world.w.is_finite() && world.h.is_finite() && world.w > 0.0 && world.h > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "world size must be > 0 in both components (got {}x{})",
                world.w, world.h
            )));
        }
        if !self.camera.lerp.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "camera.lerp must be finite (got {})",
                self.camera.lerp
            )));
        }

        let sky = &self.sky;
        if !(sky.min_separation.is_finite() && sky.min_separation >= 0.0) {
            return Err(Error::InvalidConfig(
                "sky.minSeparation must be finite and >= 0".into(),
            ));
        }
        if !(sky.reveal_radius.is_finite() && sky.reveal_radius >= 0.0) {
            return Err(Error::InvalidConfig(
                "sky.revealRadius must be finite and >= 0".into(),
            ));
        }
        if !sky.companion_offset.is_finite() {
            return Err(Error::InvalidConfig(
                "sky.companionOffset must be finite".into(),
            ));
        }
        if sky.max_attempts == 0 {
            return Err(Error::InvalidConfig("sky.maxAttempts must be > 0".into()));
        }
        if let Some(kinds) = &sky.companions {
            if kinds.len() != sky.anchor_count {
                return Err(Error::CompanionCountMismatch {
                    anchors: sky.anchor_count,
                    kinds: kinds.len(),
                });
            }
        }
        if sky.anchor_count > 0 && anchor_region(self.world_extent()).is_empty() {
            return Err(Error::InvalidConfig(format!(
                "world height {} leaves no room for anchors",
                world.h
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_takes_defaults() {
        let config = SkyConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SkyConfig::default());
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.world.w, 2400.0);
        assert_eq!(config.world.h, 1600.0);
        assert_eq!(config.world.bg, [235, 235, 235]);
        assert_eq!(config.world.grid_step, 160.0);
        assert_eq!(config.camera.lerp, 0.12);
        assert!(config.obstacles.is_empty());
        assert_eq!(config.sky.anchor_count, 5);
        assert!(config.sky.companions.is_none());
        assert_eq!(config.sky.companion_kinds(), CompanionKind::DEFAULT_SEQUENCE.to_vec());
        assert!(config.sky.seed.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = SkyConfig::from_json_str(
            r#"{ "world": { "w": 3000 }, "camera": {}, "schemaVersion": 2 }"#,
        )
        .unwrap();
        assert_eq!(config.schema_version, 2);
        assert_eq!(config.world.w, 3000.0);
        assert_eq!(config.world.h, 1600.0);
        assert_eq!(config.world.grid_step, 160.0);
        assert_eq!(config.camera.lerp, 0.12);
    }

    #[test]
    fn obstacles_pass_through_untouched() {
        let json = serde_json::json!({
            "obstacles": [{ "x": 10, "y": 20, "w": 30, "h": 40 }, "anything", 7]
        });
        let config = SkyConfig::from_json_value(json.clone()).unwrap();
        assert_eq!(config.obstacles.len(), 3);

        let back: serde_json::Value =
            serde_json::from_str(&config.to_json_string_pretty().unwrap()).unwrap();
        assert_eq!(back["obstacles"], json["obstacles"]);
    }

    #[test]
    fn sky_section_parses_companions_and_seed() {
        let config = SkyConfig::from_json_slice(
            br#"{ "sky": { "anchorCount": 2, "companions": ["venus", "moon"], "seed": 7 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.sky.companion_kinds(),
            vec![CompanionKind::Venus, CompanionKind::Moon]
        );
        assert_eq!(config.sky.seed, Some(7));
        config.validate().unwrap();
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SkyConfig::from_json_str(r#"{ "world": { "w": "wide" } }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_world = SkyConfig::default().with_world_extent(Vec2::new(0.0, 100.0));
        assert!(matches!(bad_world.validate(), Err(Error::InvalidConfig(_))));

        let nan_lerp = SkyConfig::default().with_camera_lerp(f32::NAN);
        assert!(nan_lerp.validate().is_err());

        let bad_radius = SkyConfig::default().with_reveal_radius(-1.0);
        assert!(bad_radius.validate().is_err());

        let no_budget = SkyConfig::default().with_max_attempts(0);
        assert!(no_budget.validate().is_err());

        let short = SkyConfig::default().with_world_extent(Vec2::new(2400.0, 400.0));
        assert!(matches!(short.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_mismatched_companions() {
        let mut config = SkyConfig::default();
        config.sky.anchor_count = 6;
        config.sky.companions = Some(CompanionKind::DEFAULT_SEQUENCE.to_vec());
        assert!(matches!(
            config.validate(),
            Err(Error::CompanionCountMismatch {
                anchors: 6,
                kinds: 5
            })
        ));
    }

    #[test]
    fn with_companions_keeps_counts_aligned() {
        let config = SkyConfig::default().with_companions(vec![CompanionKind::Moon; 3]);
        assert_eq!(config.sky.anchor_count, 3);
        config.validate().unwrap();
    }

    #[test]
    fn anchor_count_alone_repeats_default_kinds() {
        let config = SkyConfig::from_json_str(r#"{ "sky": { "anchorCount": 3 } }"#).unwrap();
        config.validate().unwrap();
        assert_eq!(
            config.sky.companion_kinds(),
            vec![
                CompanionKind::Moon,
                CompanionKind::PurpleCloud,
                CompanionKind::Venus
            ]
        );

        let mut many = SkyConfig::default();
        many.sky.anchor_count = 7;
        let kinds = many.sky.companion_kinds();
        assert_eq!(kinds.len(), 7);
        assert_eq!(kinds[5], CompanionKind::Moon);
        assert_eq!(kinds[6], CompanionKind::PurpleCloud);
    }

    #[test]
    fn renderer_only_fields_are_not_constrained() {
        let config = SkyConfig::from_json_str(
            r#"{ "world": { "gridStep": 0 }, "camera": { "lerp": 1.5 } }"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.world.grid_step, 0.0);
        assert_eq!(config.camera.lerp, 1.5);
    }
}
