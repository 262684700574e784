//! Wire-level data model shared by the profile updater, the policy and the
//! safety enforcer.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One floor's worth of telemetry from the game engine.
///
/// Values are assumed to be validated by the transport layer before they
/// reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerObservation {
    /// Was the last decision correct?
    pub correct: bool,
    /// Times the same choice was repeated.
    pub repetition: u32,
    /// Seconds before making the choice.
    pub hesitation: f64,
    /// Floor the observation was taken on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    /// Caller-smoothed logic confidence (stateless call path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_confidence: Option<f64>,
    /// Caller-smoothed trust level (stateless call path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_level: Option<f64>,
}

impl PlayerObservation {
    /// Create an observation without floor or snapshot fields.
    pub fn new(correct: bool, repetition: u32, hesitation: f64) -> Self {
        Self {
            correct,
            repetition,
            hesitation,
            floor: None,
            logic_confidence: None,
            trust_level: None,
        }
    }

    /// Attach the floor number.
    pub fn with_floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Attach a caller-supplied profile snapshot.
    pub fn with_snapshot(mut self, logic_confidence: f64, trust_level: f64) -> Self {
        self.logic_confidence = Some(logic_confidence);
        self.trust_level = Some(trust_level);
        self
    }

    /// The caller-supplied snapshot, if both halves are present.
    pub fn snapshot(&self) -> Option<ProfileSnapshot> {
        match (self.logic_confidence, self.trust_level) {
            (Some(logic_confidence), Some(trust_level)) => Some(ProfileSnapshot {
                logic_confidence,
                trust_level,
            }),
            _ => None,
        }
    }
}

/// The two profile signals the policy reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub logic_confidence: f64,
    pub trust_level: f64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Severity of the anomaly the engine should stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyLevel {
    None,
    Subtle,
    Aggressive,
}

impl AnomalyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyLevel::None => "none",
            AnomalyLevel::Subtle => "subtle",
            AnomalyLevel::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for AnomalyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which channel the anomaly is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCategory {
    Environment,
    Audio,
    Logic,
}

impl AnomalyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyCategory::Environment => "environment",
            AnomalyCategory::Audio => "audio",
            AnomalyCategory::Logic => "logic",
        }
    }
}

impl std::fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// High-level intent returned to the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectorInstructions {
    pub anomaly_level: AnomalyLevel,
    /// 0.0 to 1.0
    pub anomaly_probability: f64,
    pub anomaly_category: AnomalyCategory,
    /// Is rule-breaking permitted?
    pub lie_allowed: bool,
}

impl DirectorInstructions {
    pub const fn new(
        anomaly_level: AnomalyLevel,
        anomaly_probability: f64,
        anomaly_category: AnomalyCategory,
        lie_allowed: bool,
    ) -> Self {
        Self {
            anomaly_level,
            anomaly_probability,
            anomaly_category,
            lie_allowed,
        }
    }

    /// Honest, low-key environment directive with the given probability.
    pub const fn quiet(anomaly_probability: f64) -> Self {
        Self::new(
            AnomalyLevel::Subtle,
            anomaly_probability,
            AnomalyCategory::Environment,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_wire_format() {
        let instructions =
            DirectorInstructions::new(AnomalyLevel::Aggressive, 1.0, AnomalyCategory::Audio, false);
        let json = serde_json::to_value(instructions).unwrap();
        assert_eq!(json["anomaly_level"], "aggressive");
        assert_eq!(json["anomaly_probability"], 1.0);
        assert_eq!(json["anomaly_category"], "audio");
        assert_eq!(json["lie_allowed"], false);
    }

    #[test]
    fn test_observation_optional_fields() {
        let obs: PlayerObservation =
            serde_json::from_str(r#"{"correct": true, "repetition": 0, "hesitation": 2.5}"#)
                .unwrap();
        assert_eq!(obs, PlayerObservation::new(true, 0, 2.5));
        assert!(obs.snapshot().is_none());

        let json = serde_json::to_value(obs).unwrap();
        assert!(json.get("floor").is_none());
        assert!(json.get("trust_level").is_none());
    }

    #[test]
    fn test_snapshot_requires_both_fields() {
        let mut obs = PlayerObservation::new(false, 1, 1.0);
        obs.logic_confidence = Some(0.8);
        assert!(obs.snapshot().is_none());

        let obs = obs.with_snapshot(0.8, 0.4);
        let snapshot = obs.snapshot().unwrap();
        assert_eq!(snapshot.logic_confidence, 0.8);
        assert_eq!(snapshot.trust_level, 0.4);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(AnomalyLevel::Subtle.to_string(), "subtle");
        assert_eq!(AnomalyLevel::None.to_string(), "none");
        assert_eq!(AnomalyCategory::Logic.to_string(), "logic");
    }
}
