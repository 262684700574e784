//! # Anomaly Director
//!
//! Behavioral-adaptation policy service for an interactive game.
//!
//! The game engine reports per-floor telemetry (correctness, hesitation,
//! repetition). The director folds it into a smoothed per-session
//! [`BehaviorProfile`], picks a directive from an ordered rule ladder, and
//! clamps it through a safety pass before returning
//! [`DirectorInstructions`] to the engine.

pub mod config;
pub mod director;
pub mod server;

pub use config::DirectorConfig;
pub use director::{
    AnomalyCategory, AnomalyLevel, BehaviorProfile, Director, DirectorInstructions,
    PlayerObservation,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
