//! Canned play sessions for exercising the director end to end.

use serde::Serialize;

use super::service::Director;
use super::types::{AnomalyCategory, AnomalyLevel, PlayerObservation};

/// A named sequence of observations.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub steps: Vec<PlayerObservation>,
}

/// One row of a replayed scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRow {
    pub step: usize,
    pub observation: PlayerObservation,
    pub logic_confidence: f64,
    pub trust_level: f64,
    pub adaptability: f64,
    pub anomaly_level: AnomalyLevel,
    pub anomaly_probability: f64,
    pub anomaly_category: AnomalyCategory,
    pub lie_allowed: bool,
    pub rule: &'static str,
}

fn obs(correct: bool, repetition: u32, hesitation: f64) -> PlayerObservation {
    PlayerObservation::new(correct, repetition, hesitation)
}

/// Slow, correct, never repeats.
pub fn careful_player() -> Scenario {
    Scenario {
        name: "careful",
        steps: vec![
            obs(true, 0, 4.0),
            obs(true, 0, 3.5),
            obs(true, 0, 2.5),
            obs(true, 0, 2.0),
            obs(true, 0, 1.5),
        ],
    }
}

/// Panics through three wrong repeated answers, then recovers.
pub fn panic_player() -> Scenario {
    Scenario {
        name: "panic",
        steps: vec![
            obs(false, 1, 6.0),
            obs(false, 2, 7.0),
            obs(false, 3, 6.5),
            obs(true, 0, 3.0),
            obs(true, 0, 2.5),
        ],
    }
}

/// Spams fast guesses until one lands.
pub fn brute_forcer() -> Scenario {
    Scenario {
        name: "brute-force",
        steps: vec![
            obs(false, 1, 1.0),
            obs(false, 2, 1.0),
            obs(false, 3, 1.0),
            obs(true, 3, 0.8),
        ],
    }
}

/// `moves` perfect answers in a row.
pub fn ending(moves: usize) -> Scenario {
    Scenario {
        name: "ending",
        steps: vec![obs(true, 0, 2.0); moves],
    }
}

pub fn all() -> Vec<Scenario> {
    vec![careful_player(), panic_player(), brute_forcer(), ending(15)]
}

/// Look a scenario up by name (`ending` uses 15 moves).
pub fn by_name(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name == name)
}

/// Replay `scenario` in a fresh session of `director`.
pub fn run_scenario(director: &Director, scenario: &Scenario) -> Vec<TraceRow> {
    let session = format!("scenario:{}", scenario.name);
    let _ = director.reset(&session);

    scenario
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let outcome = director.observe(&session, step);
            TraceRow {
                step: i + 1,
                observation: *step,
                logic_confidence: outcome.profile.logic_confidence,
                trust_level: outcome.profile.trust_level,
                adaptability: outcome.profile.adaptability,
                anomaly_level: outcome.instructions.anomaly_level,
                anomaly_probability: outcome.instructions.anomaly_probability,
                anomaly_category: outcome.instructions.anomaly_category,
                lie_allowed: outcome.instructions.lie_allowed,
                rule: outcome.rule,
            }
        })
        .collect()
}
