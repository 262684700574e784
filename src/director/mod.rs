//! # Director
//!
//! Behavioral-adaptation core. Each observation flows through
//!
//! ```text
//! PlayerObservation
//!   -> BehaviorProfile::update   (smoothing, per session)
//!   -> DirectorPolicy::evaluate  (rule ladder + convergence override)
//!   -> SafetyEnforcer::enforce   (no early lies, no late aggression)
//!   -> DirectorInstructions
//! ```
//!
//! The three steps are pure; [`Director`] owns the session store and runs
//! them under the session's lock.

pub mod error;
pub mod policy;
pub mod profile;
pub mod safety;
pub mod scenarios;
pub mod service;
pub mod store;
pub mod types;

pub use error::DirectorError;
pub use policy::{DirectorPolicy, DirectorRule, PolicyDecision};
pub use profile::BehaviorProfile;
pub use safety::SafetyEnforcer;
pub use service::{Director, Outcome, DEFAULT_SESSION};
pub use store::{ProfileStore, SessionRecord};
pub use types::{
    AnomalyCategory, AnomalyLevel, DirectorInstructions, PlayerObservation, ProfileSnapshot,
};
