//! # Director Policy
//!
//! Maps a profile snapshot to a directive in two passes:
//!
//! 1. An ordered rule ladder, first match wins. When nothing matches, the
//!    uncertain-band fallback is used.
//! 2. The convergence override, applied unconditionally afterwards. Once
//!    trust is high the director withdraws no matter what the ladder chose.
//!
//! ```text
//! testing     logic > 0.7 && !(trust > 0.9)   -> subtle  1.0 logic
//! restore     logic < 0.4 &&   trust > 0.6    -> subtle  0.0 environment
//! pressure    logic < 0.4 && !(trust > 0.6)   -> aggr.   1.0 audio
//! uncertain   (fallback)                      -> subtle  p   environment
//! ----------------------------------------------------------------------
//! convergence trust > 0.9 (override)          -> subtle  0.0 environment
//! ```

use super::types::{AnomalyCategory, AnomalyLevel, DirectorInstructions, ProfileSnapshot};

const CONFIDENT_ABOVE: f64 = 0.7;
const UNSTABLE_BELOW: f64 = 0.4;
const TRUSTING_ABOVE: f64 = 0.6;
/// Trust level past which the player is considered converged.
pub const CONVERGED_ABOVE: f64 = 0.9;

fn confident(s: &ProfileSnapshot) -> bool {
    s.logic_confidence > CONFIDENT_ABOVE
}

fn unstable(s: &ProfileSnapshot) -> bool {
    s.logic_confidence < UNSTABLE_BELOW
}

fn trusting(s: &ProfileSnapshot) -> bool {
    s.trust_level > TRUSTING_ABOVE
}

fn converged(s: &ProfileSnapshot) -> bool {
    s.trust_level > CONVERGED_ABOVE
}

/// A single (predicate, outcome) entry of the policy ladder.
#[derive(Clone)]
pub struct DirectorRule {
    /// Short rule name reported with each decision.
    pub name: &'static str,
    /// What the rule is for.
    pub description: &'static str,
    predicate: fn(&ProfileSnapshot) -> bool,
    /// Directive emitted when the predicate holds.
    pub outcome: DirectorInstructions,
}

impl std::fmt::Debug for DirectorRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorRule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl DirectorRule {
    pub fn new(
        name: &'static str,
        description: &'static str,
        predicate: fn(&ProfileSnapshot) -> bool,
        outcome: DirectorInstructions,
    ) -> Self {
        Self {
            name,
            description,
            predicate,
            outcome,
        }
    }

    pub fn matches(&self, snapshot: &ProfileSnapshot) -> bool {
        (self.predicate)(snapshot)
    }
}

/// Result of evaluating the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyDecision {
    pub instructions: DirectorInstructions,
    /// Name of the rule that produced `instructions`.
    pub rule: &'static str,
}

/// The ordered rule ladder plus fallback and convergence override.
#[derive(Debug, Clone)]
pub struct DirectorPolicy {
    rules: Vec<DirectorRule>,
    fallback: DirectorRule,
    convergence: DirectorRule,
}

impl Default for DirectorPolicy {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl DirectorPolicy {
    /// Build the standard ladder. `uncertain_probability` is the anomaly
    /// probability used when no ladder rule matches.
    pub fn new(uncertain_probability: f64) -> Self {
        let rules = vec![
            DirectorRule::new(
                "testing",
                "Confident but not yet converged: test gently",
                |s| confident(s) && !converged(s),
                DirectorInstructions::new(
                    AnomalyLevel::Subtle,
                    1.0,
                    AnomalyCategory::Logic,
                    false,
                ),
            ),
            DirectorRule::new(
                "restore",
                "Unstable but still trusting: restore consistency",
                |s| unstable(s) && trusting(s),
                DirectorInstructions::quiet(0.0),
            ),
            DirectorRule::new(
                "pressure",
                "Unstable and untrusting: apply pressure without lying",
                |s| unstable(s) && !trusting(s),
                DirectorInstructions::new(
                    AnomalyLevel::Aggressive,
                    1.0,
                    AnomalyCategory::Audio,
                    false,
                ),
            ),
        ];

        Self {
            rules,
            fallback: DirectorRule::new(
                "uncertain",
                "No clear signal: minimal interference",
                |_| true,
                DirectorInstructions::quiet(uncertain_probability),
            ),
            convergence: DirectorRule::new(
                "convergence",
                "Converged: withdraw",
                converged,
                DirectorInstructions::quiet(0.0),
            ),
        }
    }

    /// The ladder rules in evaluation order.
    pub fn rules(&self) -> &[DirectorRule] {
        &self.rules
    }

    /// Evaluate the ladder, then apply the convergence override.
    pub fn evaluate(&self, snapshot: &ProfileSnapshot) -> PolicyDecision {
        let ladder = self
            .rules
            .iter()
            .find(|rule| rule.matches(snapshot))
            .unwrap_or(&self.fallback);

        let chosen = if self.convergence.matches(snapshot) {
            &self.convergence
        } else {
            ladder
        };

        log::debug!(
            "policy: logic={:.3} trust={:.3} ladder={} final={}",
            snapshot.logic_confidence,
            snapshot.trust_level,
            ladder.name,
            chosen.name
        );

        PolicyDecision {
            instructions: chosen.outcome,
            rule: chosen.name,
        }
    }

    /// Evaluate and return only the directive.
    pub fn decide(&self, snapshot: &ProfileSnapshot) -> DirectorInstructions {
        self.evaluate(snapshot).instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(logic_confidence: f64, trust_level: f64) -> ProfileSnapshot {
        ProfileSnapshot {
            logic_confidence,
            trust_level,
        }
    }

    #[test]
    fn test_rule_order() {
        let policy = DirectorPolicy::default();
        let names: Vec<_> = policy.rules().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["testing", "restore", "pressure"]);
    }

    #[test]
    fn test_testing_phase() {
        let decision = DirectorPolicy::default().evaluate(&snap(0.8, 0.5));
        assert_eq!(decision.rule, "testing");
        assert_eq!(decision.instructions.anomaly_level, AnomalyLevel::Subtle);
        assert_eq!(decision.instructions.anomaly_probability, 1.0);
        assert_eq!(decision.instructions.anomaly_category, AnomalyCategory::Logic);
        assert!(!decision.instructions.lie_allowed);
    }

    #[test]
    fn test_restore_phase() {
        let decision = DirectorPolicy::default().evaluate(&snap(0.3, 0.7));
        assert_eq!(decision.rule, "restore");
        assert_eq!(decision.instructions, DirectorInstructions::quiet(0.0));
    }

    #[test]
    fn test_pressure_phase() {
        let policy = DirectorPolicy::default();
        for trust in [0.0, 0.3, 0.6] {
            let decision = policy.evaluate(&snap(0.2, trust));
            assert_eq!(decision.rule, "pressure");
            assert_eq!(decision.instructions.anomaly_level, AnomalyLevel::Aggressive);
            assert_eq!(decision.instructions.anomaly_category, AnomalyCategory::Audio);
            assert_eq!(decision.instructions.anomaly_probability, 1.0);
        }
    }

    #[test]
    fn test_uncertain_band_fallback() {
        let decision = DirectorPolicy::default().evaluate(&snap(0.55, 0.5));
        assert_eq!(decision.rule, "uncertain");
        assert_eq!(decision.instructions, DirectorInstructions::quiet(0.0));

        // Band edges are exclusive.
        assert_eq!(DirectorPolicy::default().evaluate(&snap(0.7, 0.5)).rule, "uncertain");
        assert_eq!(DirectorPolicy::default().evaluate(&snap(0.4, 0.5)).rule, "uncertain");

        let tuned = DirectorPolicy::new(0.3).decide(&snap(0.55, 0.5));
        assert_eq!(tuned.anomaly_probability, 0.3);
        assert_eq!(tuned.anomaly_category, AnomalyCategory::Environment);
    }

    #[test]
    fn test_convergence_overrides_every_phase() {
        let policy = DirectorPolicy::new(0.3);
        for logic in [0.0, 0.2, 0.39, 0.5, 0.71, 0.95, 1.0] {
            for trust in [0.9001, 0.95, 1.0] {
                let decision = policy.evaluate(&snap(logic, trust));
                assert_eq!(decision.rule, "convergence");
                assert_eq!(decision.instructions.anomaly_probability, 0.0);
                assert_eq!(
                    decision.instructions.anomaly_category,
                    AnomalyCategory::Environment
                );
                assert!(!decision.instructions.lie_allowed);
            }
        }
    }

    #[test]
    fn test_exactly_point_nine_is_not_converged() {
        let decision = DirectorPolicy::default().evaluate(&snap(0.8, 0.9));
        assert_eq!(decision.rule, "testing");
    }
}
