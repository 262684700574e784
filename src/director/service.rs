//! The director: profile store + policy + safety wired into one call.

use serde::Serialize;

use super::error::{DirectorError, Result};
use super::policy::DirectorPolicy;
use super::profile::BehaviorProfile;
use super::safety::SafetyEnforcer;
use super::store::{ProfileStore, SessionRecord};
use super::types::{DirectorInstructions, PlayerObservation};

/// Session key used when the caller does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// What a stateful observation produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    /// Profile after folding in the observation.
    pub profile: BehaviorProfile,
    /// Directive after the safety pass.
    pub instructions: DirectorInstructions,
    /// Policy rule that chose the directive.
    pub rule: &'static str,
}

#[derive(Debug)]
pub struct Director {
    policy: DirectorPolicy,
    safety: SafetyEnforcer,
    store: ProfileStore,
    default_session: String,
}

impl Default for Director {
    fn default() -> Self {
        Self::new(DirectorPolicy::default(), SafetyEnforcer::default())
    }
}

impl Director {
    pub fn new(policy: DirectorPolicy, safety: SafetyEnforcer) -> Self {
        Self {
            policy,
            safety,
            store: ProfileStore::new(),
            default_session: DEFAULT_SESSION.to_string(),
        }
    }

    /// Use a different key for session-less requests.
    pub fn with_default_session(mut self, session: impl Into<String>) -> Self {
        self.default_session = session.into();
        self
    }

    pub fn default_session(&self) -> &str {
        &self.default_session
    }

    pub fn policy(&self) -> &DirectorPolicy {
        &self.policy
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Stateful path: update the session's profile, decide, then clamp.
    ///
    /// The session entry stays locked for the whole sequence.
    pub fn observe(&self, session: &str, obs: &PlayerObservation) -> Outcome {
        self.store.with_session(session, |record| {
            record.profile.update(obs);
            if obs.floor.is_some() {
                record.last_floor = obs.floor;
            }

            let profile = record.profile;
            let decision = self.policy.evaluate(&profile.snapshot());
            let instructions =
                self.safety
                    .enforce(decision.instructions, obs, profile.trust_level);

            Outcome {
                profile,
                instructions,
                rule: decision.rule,
            }
        })
    }

    /// Stateful path against the default session.
    pub fn observe_default(&self, obs: &PlayerObservation) -> Outcome {
        self.observe(&self.default_session, obs)
    }

    /// Stateless path: decide from the snapshot carried by the observation.
    /// No profile is read or written.
    pub fn evaluate(&self, obs: &PlayerObservation) -> Result<DirectorInstructions> {
        let snapshot = obs.snapshot().ok_or(DirectorError::MissingSnapshot)?;
        let decision = self.policy.evaluate(&snapshot);
        Ok(self
            .safety
            .enforce(decision.instructions, obs, snapshot.trust_level))
    }

    pub fn session(&self, session: &str) -> Result<SessionRecord> {
        self.store.get(session)
    }

    pub fn reset(&self, session: &str) -> Result<SessionRecord> {
        self.store.reset(session)
    }
}
