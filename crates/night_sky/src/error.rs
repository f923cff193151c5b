//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, exhausted anchor placement, mismatched companion lists, and JSON
//! parse failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "anchor {index} could not be placed after {attempts} attempts \
         (min separation {min_separation}); enlarge the world or reduce anchor count"
    )]
    PlacementExhausted {
        index: usize,
        attempts: usize,
        min_separation: f32,
    },

    #[error("companion kinds ({kinds}) do not match anchor count ({anchors})")]
    CompanionCountMismatch { anchors: usize, kinds: usize },

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
