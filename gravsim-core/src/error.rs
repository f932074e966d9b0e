//! Error types for the simulation core.
//!
//! Every failure in the core is a rejected mutation: the prior state is kept
//! intact and the caller gets one of these back.

use crate::store::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("mass {mass} {unit} is too large to simulate")]
    MassTooLarge { mass: f32, unit: &'static str },

    #[error("restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f32),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("no {0}")]
    EntityNotFound(EntityId),

    #[error("no entity is selected")]
    NoSelection,

    #[error("entities can only be edited while the simulation is paused")]
    NotPaused,

    #[error("invalid scene: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),
}
