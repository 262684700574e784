//! Smoothed behavioral profile and its update law.
//!
//! Each observation is reduced to a step-level logic score which is blended
//! into the stored profile with a fixed learning rate. Adaptability and trust
//! move by small fixed deltas; trust decays slightly once it is high so the
//! profile settles instead of oscillating late in a session.

use serde::{Deserialize, Serialize};

use super::types::{PlayerObservation, ProfileSnapshot};

/// EMA weight given to the newest step score.
pub const LEARNING_RATE: f64 = 0.1;

/// Hesitation (seconds) beyond which the step score is penalized.
const HESITATION_GRACE: f64 = 3.0;
const HESITATION_PENALTY_PER_SECOND: f64 = 0.1;
const HESITATION_PENALTY_MAX: f64 = 0.5;

const REPETITION_PENALTY_PER_REPEAT: f64 = 0.15;
const REPETITION_PENALTY_MAX: f64 = 0.4;

const ADAPTABILITY_STUCK: f64 = -0.02;
const ADAPTABILITY_CLEAN: f64 = 0.015;
const ADAPTABILITY_FIRST_MISS: f64 = 0.005;

const TRUST_STEP: f64 = 0.01;
/// Trust above this level decays by [`TRUST_DECAY`] on every update.
pub const TRUST_DEAD_ZONE: f64 = 0.85;
const TRUST_DECAY: f64 = 0.002;

/// Clamp a signal into `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Logic inference from a single raw observation, in `[0, 1]`.
pub fn step_logic_score(obs: &PlayerObservation) -> f64 {
    let mut score = if obs.correct { 1.0 } else { 0.0 };

    if obs.hesitation > HESITATION_GRACE {
        let penalty = (obs.hesitation - HESITATION_GRACE) * HESITATION_PENALTY_PER_SECOND;
        score -= penalty.min(HESITATION_PENALTY_MAX);
    }

    if obs.repetition > 0 {
        let penalty = f64::from(obs.repetition) * REPETITION_PENALTY_PER_REPEAT;
        score -= penalty.min(REPETITION_PENALTY_MAX);
    }

    clamp_unit(score)
}

/// Latest smoothed view of how a player behaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub logic_confidence: f64,
    pub trust_level: f64,
    pub adaptability: f64,
    /// Number of observations folded into this profile.
    pub samples: u64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            logic_confidence: 0.5,
            trust_level: 0.5,
            adaptability: 0.5,
            samples: 0,
        }
    }
}

impl BehaviorProfile {
    /// A fresh profile at the neutral midpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// The signals the director policy reads.
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            logic_confidence: self.logic_confidence,
            trust_level: self.trust_level,
        }
    }

    /// Fold one observation into the profile in place.
    pub fn update(&mut self, obs: &PlayerObservation) -> &mut Self {
        let step_score = step_logic_score(obs);
        let clean = obs.correct && obs.repetition == 0;

        self.logic_confidence =
            self.logic_confidence * (1.0 - LEARNING_RATE) + step_score * LEARNING_RATE;

        // A first-attempt miss counts as mild evidence of exploration.
        if !obs.correct && obs.repetition > 0 {
            self.adaptability += ADAPTABILITY_STUCK;
        } else if clean {
            self.adaptability += ADAPTABILITY_CLEAN;
        } else if !obs.correct {
            self.adaptability += ADAPTABILITY_FIRST_MISS;
        }

        if clean {
            self.trust_level += TRUST_STEP;
        } else if obs.repetition > 1 {
            self.trust_level -= TRUST_STEP;
        }

        if self.trust_level > TRUST_DEAD_ZONE {
            self.trust_level -= TRUST_DECAY;
        }

        self.logic_confidence = clamp_unit(self.logic_confidence);
        self.trust_level = clamp_unit(self.trust_level);
        self.adaptability = clamp_unit(self.adaptability);

        self.samples += 1;
        self
    }

    /// Consuming variant of [`BehaviorProfile::update`].
    pub fn updated(mut self, obs: &PlayerObservation) -> Self {
        self.update(obs);
        self
    }
}
