//! Session-keyed profile store.
//!
//! One [`BehaviorProfile`] per session key. A caller that updates a session
//! holds that entry exclusively for the whole read-modify-write, so
//! concurrent observations on the same session are serialized while other
//! sessions proceed independently.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::error::{DirectorError, Result};
use super::profile::BehaviorProfile;

/// Stored state for one play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub profile: BehaviorProfile,
    /// Floor reported by the most recent observation, if any.
    pub last_floor: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            profile: BehaviorProfile::new(),
            last_floor: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory map from session key to profile. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct ProfileStore {
    sessions: DashMap<String, SessionRecord>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register an empty session. Returns `false` if it already existed.
    pub fn create(&self, session: &str) -> bool {
        match self.sessions.entry(session.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(SessionRecord::new());
                log::debug!("store: created session {}", session);
                true
            }
        }
    }

    /// Run `f` with exclusive access to the session's record, creating a
    /// neutral one first if the session is unknown.
    pub fn with_session<F, R>(&self, session: &str, f: F) -> R
    where
        F: FnOnce(&mut SessionRecord) -> R,
    {
        let mut entry = self
            .sessions
            .entry(session.to_string())
            .or_insert_with(|| {
                log::debug!("store: created session {}", session);
                SessionRecord::new()
            });
        let result = f(entry.value_mut());
        entry.updated_at = Utc::now();
        result
    }

    /// Copy of the stored record.
    pub fn get(&self, session: &str) -> Result<SessionRecord> {
        self.sessions
            .get(session)
            .map(|r| r.value().clone())
            .ok_or_else(|| DirectorError::SessionNotFound(session.to_string()))
    }

    /// Drop a session and return its final record.
    pub fn reset(&self, session: &str) -> Result<SessionRecord> {
        self.sessions
            .remove(session)
            .map(|(_, record)| {
                log::debug!("store: reset session {}", session);
                record
            })
            .ok_or_else(|| DirectorError::SessionNotFound(session.to_string()))
    }

    /// Known session keys, sorted.
    pub fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::director::types::PlayerObservation;

    #[test]
    fn test_unknown_session_is_created_on_first_use() {
        let store = ProfileStore::new();
        assert!(store.is_empty());
        let samples = store.with_session("s1", |record| {
            record.profile.update(&PlayerObservation::new(true, 0, 1.0));
            record.profile.samples
        });
        assert_eq!(samples, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("s1").unwrap().profile.samples, 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = ProfileStore::new();
        store.with_session("a", |r| {
            r.profile.update(&PlayerObservation::new(false, 3, 9.0));
        });
        store.create("b");
        assert_eq!(store.get("b").unwrap().profile, BehaviorProfile::new());
        assert_ne!(store.get("a").unwrap().profile, BehaviorProfile::new());
        assert_eq!(store.session_ids(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_create_is_idempotent() {
        let store = ProfileStore::new();
        assert!(store.create("s"));
        assert!(!store.create("s"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_and_missing_sessions() {
        let store = ProfileStore::new();
        store.create("s");
        assert!(store.reset("s").is_ok());
        assert_eq!(
            store.reset("s"),
            Err(DirectorError::SessionNotFound("s".to_string()))
        );
        assert!(matches!(
            store.get("s"),
            Err(DirectorError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = ProfileStore::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        store.with_session("shared", |r| {
                            r.profile.update(&PlayerObservation::new(true, 0, 1.0));
                        });
                    }
                });
            }
        });
        assert_eq!(store.get("shared").unwrap().profile.samples, 2000);
    }
}
