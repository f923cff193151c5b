//! Sky descriptors: star field, swirls, anchor stars and their companions.
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod anchors;
pub mod companion;
pub mod field;

/// Brightness shared by every anchor star.
pub const ANCHOR_BRIGHTNESS: f32 = 255.0;

/// Twinkle factor in `[0, 1]` for a given animation frame.
#[inline]
pub fn twinkle_factor(frame: f32, speed: f32, phase: f32) -> f32 {
    (frame * speed + phase).sin() * 0.5 + 0.5
}

/// A small background star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarPoint {
    pub position: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub glow_size: f32,
    pub twinkle_speed: f32,
    pub phase: f32,
}

impl StarPoint {
    pub fn twinkle(&self, frame: f32) -> f32 {
        twinkle_factor(frame, self.twinkle_speed, self.phase)
    }
}

/// A rotating spiral in the atmosphere layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwirlPoint {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    /// Angular speed in radians per frame.
    pub speed: f32,
    pub rotation: f32,
    pub tightness: f32,
}

impl SwirlPoint {
    /// Rotation angle in radians at `frame`.
    pub fn angle(&self, frame: f32) -> f32 {
        frame * self.speed + self.rotation
    }
}

/// One of the large, always visible stars.
///
/// `index` is the creation order and keys the companion and reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorStar {
    pub index: usize,
    pub position: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub glow_size: f32,
    pub twinkle_speed: f32,
    pub phase: f32,
}

impl AnchorStar {
    pub fn twinkle(&self, frame: f32) -> f32 {
        twinkle_factor(frame, self.twinkle_speed, self.phase)
    }
}

/// Closed set of companion objects that can hide behind an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanionKind {
    Moon,
    PurpleCloud,
    Venus,
    OrangeCloud,
    Neptune,
}

impl CompanionKind {
    /// Kinds assigned to anchors 0..5 when no other sequence is configured.
    pub const DEFAULT_SEQUENCE: [CompanionKind; 5] = [
        CompanionKind::Moon,
        CompanionKind::PurpleCloud,
        CompanionKind::Venus,
        CompanionKind::OrangeCloud,
        CompanionKind::Neptune,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanionKind::Moon => "moon",
            CompanionKind::PurpleCloud => "purple-cloud",
            CompanionKind::Venus => "venus",
            CompanionKind::OrangeCloud => "orange-cloud",
            CompanionKind::Neptune => "neptune",
        }
    }
}

impl fmt::Display for CompanionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompanionKind::DEFAULT_SEQUENCE
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown companion kind '{s}'")))
    }
}

/// A hidden object shown below an anchor while the agent is near it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub anchor_index: usize,
    pub kind: CompanionKind,
    pub position: Vec2,
}

/// An anchor star paired with its companion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchoredCompanion {
    pub anchor: AnchorStar,
    pub companion: Companion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_kind_names_round_trip() {
        for kind in CompanionKind::DEFAULT_SEQUENCE {
            assert_eq!(kind.as_str().parse::<CompanionKind>().unwrap(), kind);
        }
        assert!("saturn".parse::<CompanionKind>().is_err());
    }

    #[test]
    fn companion_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&CompanionKind::PurpleCloud).unwrap();
        assert_eq!(json, "\"purple-cloud\"");
        let kind: CompanionKind = serde_json::from_str("\"orange-cloud\"").unwrap();
        assert_eq!(kind, CompanionKind::OrangeCloud);
    }

    #[test]
    fn twinkle_stays_in_unit_range() {
        for frame in [0.0, 1.0, 17.5, 1000.0] {
            let t = twinkle_factor(frame, 0.05, 1.3);
            assert!((0.0..=1.0).contains(&t));
        }
        assert!((twinkle_factor(0.0, 0.1, 0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn swirl_angle_advances_with_frame() {
        let swirl = SwirlPoint {
            position: Vec2::ZERO,
            radius: 10.0,
            opacity: 50.0,
            speed: 0.02,
            rotation: 1.0,
            tightness: 10.0,
        };
        assert_eq!(swirl.angle(0.0), 1.0);
        assert!((swirl.angle(50.0) - 2.0).abs() < 1e-6);
    }
}
