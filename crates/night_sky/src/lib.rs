#![forbid(unsafe_code)]
//! night_sky: procedural night-sky backdrop with proximity-driven reveals.
//!
//! Modules:
//! - sampling: candidate generation (uniform random, bounded rejection sampling)
//! - sky: star and swirl fields, separated anchor stars, companion derivation
//! - reveal: per-anchor near/revealed tracking driven by an agent position
//! - scene: [`scene::NightSky`] assembly from a [`config::SkyConfig`]
//! - events: observation hooks for generation and reveal evaluation
pub mod config;
pub mod error;
pub mod events;
pub mod reveal;
pub mod sampling;
pub mod scene;
pub mod sky;

/// Convenient re-exports for common types. Import with `use night_sky::prelude::*;`.
pub mod prelude {
    pub use crate::config::{CameraConfig, GenerationConfig, SkyConfig, WorldConfig};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, SkyEvent, VecSink};
    pub use crate::reveal::{AnchorVisibility, RevealTracker, RevealUpdate};
    pub use crate::sampling::{
        PositionSampling, RejectionSampling, SampleRegion, UniformRandomSampling,
    };
    pub use crate::scene::NightSky;
    pub use crate::sky::anchors::{anchor_region, place_anchors};
    pub use crate::sky::companion::{derive_companions, pair_companions};
    pub use crate::sky::field::{generate_stars, generate_swirls};
    pub use crate::sky::{
        AnchorStar, AnchoredCompanion, Companion, CompanionKind, StarPoint, SwirlPoint,
    };
}
