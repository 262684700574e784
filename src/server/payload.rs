//! Request decoding and boundary validation.
//!
//! Every field is optional on the wire so a missing field can be reported by
//! name instead of as a generic decode failure.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use crate::director::error::{DirectorError, Result};
use crate::director::PlayerObservation;

/// Raw observation body as sent by the game engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationPayload {
    pub correct: Option<bool>,
    pub repetition: Option<i64>,
    pub hesitation: Option<f64>,
    pub floor: Option<i64>,
    pub logic_confidence: Option<f64>,
    pub trust_level: Option<f64>,
}

fn unit_interval(field: &'static str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !(0.0..=1.0).contains(&v) => {
            Err(DirectorError::invalid(field, format!("{} is outside [0, 1]", v)))
        }
        other => Ok(other),
    }
}

impl ObservationPayload {
    /// Check ranges and produce a core observation.
    pub fn validate(self) -> Result<PlayerObservation> {
        let correct = self.correct.ok_or(DirectorError::MissingField("correct"))?;

        let repetition = self
            .repetition
            .ok_or(DirectorError::MissingField("repetition"))?;
        let repetition = u32::try_from(repetition).map_err(|_| {
            DirectorError::invalid(
                "repetition",
                format!("{} is not a non-negative count", repetition),
            )
        })?;

        let hesitation = self
            .hesitation
            .ok_or(DirectorError::MissingField("hesitation"))?;
        if !hesitation.is_finite() || hesitation < 0.0 {
            return Err(DirectorError::invalid(
                "hesitation",
                format!("{} is not a non-negative number of seconds", hesitation),
            ));
        }

        Ok(PlayerObservation {
            correct,
            repetition,
            hesitation,
            floor: self.floor,
            logic_confidence: unit_interval("logic_confidence", self.logic_confidence)?,
            trust_level: unit_interval("trust_level", self.trust_level)?,
        })
    }
}

/// Turn an extractor result into a validated observation.
pub fn decode(
    payload: std::result::Result<Json<ObservationPayload>, JsonRejection>,
) -> Result<PlayerObservation> {
    let Json(payload) = payload.map_err(|rejection| DirectorError::Malformed(rejection.body_text()))?;
    payload.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> ObservationPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_valid_payload() {
        let obs = payload(serde_json::json!({
            "correct": true, "repetition": 2, "hesitation": 3.5, "floor": 6
        }))
        .validate()
        .unwrap();
        assert_eq!(obs, PlayerObservation::new(true, 2, 3.5).with_floor(6));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let err = payload(serde_json::json!({"repetition": 0, "hesitation": 1.0}))
            .validate()
            .unwrap_err();
        assert_eq!(err, DirectorError::MissingField("correct"));

        let err = payload(serde_json::json!({"correct": true, "hesitation": 1.0}))
            .validate()
            .unwrap_err();
        assert_eq!(err, DirectorError::MissingField("repetition"));

        let err = payload(serde_json::json!({"correct": true, "repetition": 0}))
            .validate()
            .unwrap_err();
        assert_eq!(err, DirectorError::MissingField("hesitation"));
    }

    #[test]
    fn test_range_checks() {
        let negative_rep = payload(serde_json::json!({
            "correct": true, "repetition": -1, "hesitation": 1.0
        }));
        assert!(matches!(
            negative_rep.validate(),
            Err(DirectorError::InvalidField { field: "repetition", .. })
        ));

        let negative_hesitation = payload(serde_json::json!({
            "correct": true, "repetition": 0, "hesitation": -0.5
        }));
        assert!(matches!(
            negative_hesitation.validate(),
            Err(DirectorError::InvalidField { field: "hesitation", .. })
        ));

        let bad_trust = payload(serde_json::json!({
            "correct": true, "repetition": 0, "hesitation": 0.0, "trust_level": 1.2
        }));
        assert!(matches!(
            bad_trust.validate(),
            Err(DirectorError::InvalidField { field: "trust_level", .. })
        ));
    }

    #[test]
    fn test_wrong_type_fails_decoding() {
        let result: std::result::Result<ObservationPayload, _> = serde_json::from_value(
            serde_json::json!({"correct": "yes", "repetition": 0, "hesitation": 1.0}),
        );
        assert!(result.is_err());
    }
}
