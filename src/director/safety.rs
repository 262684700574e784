//! Post-policy safety clamp.

use super::types::{AnomalyLevel, DirectorInstructions, PlayerObservation};

/// Final pass applied to every directive before it leaves the service.
///
/// Two independent rules:
/// - no deception until the player has enough interaction history;
/// - no aggressive anomalies once trust is high.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyEnforcer {
    /// Repetition count below which lying is never permitted.
    pub min_repetition_for_lies: u32,
    /// Trust level above which aggressive anomalies are downgraded.
    pub aggression_trust_cap: f64,
}

impl Default for SafetyEnforcer {
    fn default() -> Self {
        Self {
            min_repetition_for_lies: 3,
            aggression_trust_cap: 0.8,
        }
    }
}

impl SafetyEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp `instructions` for this observation.
    ///
    /// The trust signal is the observation's own `trust_level` when the
    /// caller supplied one, otherwise `profile_trust`.
    pub fn enforce(
        &self,
        mut instructions: DirectorInstructions,
        obs: &PlayerObservation,
        profile_trust: f64,
    ) -> DirectorInstructions {
        if obs.repetition < self.min_repetition_for_lies && instructions.lie_allowed {
            instructions.lie_allowed = false;
            log::debug!("safety: prevented early lying (repetition={})", obs.repetition);
        }

        let trust = obs.trust_level.unwrap_or(profile_trust);
        if trust > self.aggression_trust_cap
            && instructions.anomaly_level == AnomalyLevel::Aggressive
        {
            instructions.anomaly_level = AnomalyLevel::Subtle;
            log::debug!("safety: clamped aggression due to high trust ({:.3})", trust);
        }

        instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::director::types::AnomalyCategory;

    fn lying_aggressive() -> DirectorInstructions {
        DirectorInstructions::new(AnomalyLevel::Aggressive, 1.0, AnomalyCategory::Audio, true)
    }

    #[test]
    fn test_no_early_lying() {
        let enforcer = SafetyEnforcer::new();
        for repetition in 0..3 {
            let obs = PlayerObservation::new(false, repetition, 1.0);
            let out = enforcer.enforce(lying_aggressive(), &obs, 0.0);
            assert!(!out.lie_allowed, "repetition {}", repetition);
        }
    }

    #[test]
    fn test_lying_allowed_with_history() {
        let obs = PlayerObservation::new(false, 3, 1.0);
        let out = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.0);
        assert!(out.lie_allowed);
        assert_eq!(out.anomaly_level, AnomalyLevel::Aggressive);
    }

    #[test]
    fn test_aggression_cap_uses_profile_trust() {
        let obs = PlayerObservation::new(false, 5, 1.0);
        let out = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.81);
        assert_eq!(out.anomaly_level, AnomalyLevel::Subtle);
        // Other fields are untouched.
        assert_eq!(out.anomaly_probability, 1.0);
        assert_eq!(out.anomaly_category, AnomalyCategory::Audio);

        let at_cap = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.8);
        assert_eq!(at_cap.anomaly_level, AnomalyLevel::Aggressive);
    }

    #[test]
    fn test_observation_trust_takes_precedence() {
        let obs = PlayerObservation::new(false, 5, 1.0).with_snapshot(0.2, 0.95);
        let out = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.1);
        assert_eq!(out.anomaly_level, AnomalyLevel::Subtle);

        let obs = PlayerObservation::new(false, 5, 1.0).with_snapshot(0.2, 0.5);
        let out = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.99);
        assert_eq!(out.anomaly_level, AnomalyLevel::Aggressive);
    }

    #[test]
    fn test_both_rules_apply_independently() {
        let obs = PlayerObservation::new(true, 0, 1.0);
        let out = SafetyEnforcer::new().enforce(lying_aggressive(), &obs, 0.95);
        assert!(!out.lie_allowed);
        assert_eq!(out.anomaly_level, AnomalyLevel::Subtle);
    }

    #[test]
    fn test_safe_instructions_pass_through() {
        let quiet = DirectorInstructions::quiet(0.3);
        let obs = PlayerObservation::new(true, 0, 1.0);
        assert_eq!(SafetyEnforcer::new().enforce(quiet, &obs, 1.0), quiet);
    }
}
