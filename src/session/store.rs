//! `SessionStore`: the single in-memory table of sessions, guarded by one
//! `Mutex` per store. Modeled directly on the teacher's `RateLimitLayer`
//! (`Arc<Mutex<HashMap<..>>>`, one lock acquisition per call, no lock held
//! across an await).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::cipher::{is_sensitive_field, PayloadCipher};
use crate::error::{EngineError, EngineResult};
use crate::types::{
    new_event_id, new_session_id, Event, EventInput, Module, RiskResponse, Session,
    SessionId, SessionSummary, SessionView,
};

/// Shared, cloneable handle over the session table. Clone it freely --
/// every clone points at the same underlying map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    cipher: Arc<PayloadCipher>,
}

impl SessionStore {
    pub fn new(cipher: PayloadCipher) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            cipher: Arc::new(cipher),
        }
    }

    pub fn start_session(&self, user_id: &str, device_id: &str, module: Module) -> SessionId {
        let now = Utc::now();
        let session_id = new_session_id();

        let session = Session {
            session_id: session_id.clone(),
            module,
            user_id: self.cipher.encrypt(user_id),
            device_id: self.cipher.encrypt(device_id),
            created_at: now,
            last_accessed_at: now,
            events: Vec::new(),
            last_risk: None,
        };

        self.sessions.lock().insert(session_id.clone(), session);
        session_id
    }

    /// Returns a decrypted view and bumps `last_accessed_at` -- this is a
    /// writer, not a reader, because of that side effect.
    pub fn get_session(&self, session_id: &str) -> EngineResult<SessionView> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))?;

        session.last_accessed_at = Utc::now();
        Ok(self.decrypt_view(session))
    }

    pub fn append_event(&self, session_id: &str, input: EventInput) -> EngineResult<Event> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))?;

        let event = Event {
            id: new_event_id(),
            kind: input.kind,
            payload: self.encrypt_payload(input.payload),
            timestamp: input.timestamp,
        };
        session.events.push(event.clone());
        Ok(event)
    }

    pub fn update_last_risk(&self, session_id: &str, risk: RiskResponse) -> EngineResult<()> {
        let mut sessions = self.sessions.lock();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))?;
        session.last_risk = Some(risk);
        Ok(())
    }

    pub fn summarize(
        &self,
        session_id: &str,
        key_takeaways: Vec<String>,
    ) -> EngineResult<SessionSummary> {
        let sessions = self.sessions.lock();
        let session = sessions
            .get(session_id)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))?;
        let last_risk = session
            .last_risk
            .clone()
            .ok_or_else(|| EngineError::NoEvidence { module: session.module.as_str() })?;

        Ok(SessionSummary {
            session_id: session.session_id.clone(),
            module: session.module,
            created_at: session.created_at,
            last_risk,
            key_takeaways,
        })
    }

    /// Decrypted copy of the raw events, for the dispatcher's evidence
    /// selection. Does not bump `last_accessed_at` -- it's called from
    /// within a writer that already has.
    pub(crate) fn decrypted_events(&self, session_id: &str) -> EngineResult<Vec<Event>> {
        let sessions = self.sessions.lock();
        let session = sessions
            .get(session_id)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))?;
        Ok(session
            .events
            .iter()
            .cloned()
            .map(|event| self.decrypt_event(event))
            .collect())
    }

    pub(crate) fn module_of(&self, session_id: &str) -> EngineResult<Module> {
        let sessions = self.sessions.lock();
        sessions
            .get(session_id)
            .map(|s| s.module)
            .ok_or_else(|| EngineError::NotFound(session_id.to_string()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Removes sessions idle past `ttl_hours`. `0` disables this sweep.
    pub(crate) fn evict_idle(&self, ttl_hours: u64) -> usize {
        if ttl_hours == 0 {
            return 0;
        }
        let cutoff = Utc::now() - chrono::Duration::hours(ttl_hours as i64);
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_accessed_at > cutoff);
        before - sessions.len()
    }

    /// Removes sessions older than `max_age_hours` regardless of activity.
    pub(crate) fn evict_over_age(&self, max_age_hours: u64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::hours(max_age_hours as i64);
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at > cutoff);
        before - sessions.len()
    }

    /// Drops events older than `retention_days` across every session.
    pub(crate) fn evict_old_events(&self, retention_days: u64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::days(retention_days as i64);
        let mut sessions = self.sessions.lock();
        let mut removed = 0;
        for session in sessions.values_mut() {
            let before = session.events.len();
            session.events.retain(|event| event.timestamp > cutoff);
            removed += before - session.events.len();
        }
        removed
    }

    fn decrypt_view(&self, session: &Session) -> SessionView {
        SessionView {
            session_id: session.session_id.clone(),
            module: session.module,
            user_id: self.cipher.decrypt(&session.user_id),
            device_id: self.cipher.decrypt(&session.device_id),
            created_at: session.created_at,
            last_accessed_at: session.last_accessed_at,
            events: session
                .events
                .iter()
                .cloned()
                .map(|event| self.decrypt_event(event))
                .collect(),
            last_risk: session.last_risk.clone(),
        }
    }

    fn encrypt_payload(
        &self,
        payload: HashMap<String, serde_json::Value>,
    ) -> HashMap<String, serde_json::Value> {
        payload
            .into_iter()
            .map(|(key, value)| {
                if !is_sensitive_field(&key) {
                    return (key, value);
                }
                let transformed = match value {
                    serde_json::Value::String(s) => serde_json::Value::String(self.cipher.encrypt(&s)),
                    serde_json::Value::Array(items) => serde_json::Value::Array(
                        items
                            .into_iter()
                            .map(|item| match item {
                                serde_json::Value::String(s) => {
                                    serde_json::Value::String(self.cipher.encrypt(&s))
                                }
                                other => other,
                            })
                            .collect(),
                    ),
                    other => other,
                };
                (key, transformed)
            })
            .collect()
    }

    fn decrypt_event(&self, mut event: Event) -> Event {
        event.payload = event
            .payload
            .into_iter()
            .map(|(key, value)| {
                if !is_sensitive_field(&key) {
                    return (key, value);
                }
                let transformed = match value {
                    serde_json::Value::String(s) => serde_json::Value::String(self.cipher.decrypt(&s)),
                    serde_json::Value::Array(items) => serde_json::Value::Array(
                        items
                            .into_iter()
                            .map(|item| match item {
                                serde_json::Value::String(s) => {
                                    serde_json::Value::String(self.cipher.decrypt(&s))
                                }
                                other => other,
                            })
                            .collect(),
                    ),
                    other => other,
                };
                (key, transformed)
            })
            .collect();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CipherConfig, KeySource};

    fn test_store() -> SessionStore {
        let cipher = PayloadCipher::from_config(&CipherConfig {
            enabled: true,
            key_source: KeySource::Derived {
                password: "test-password".to_string(),
                salt: "test-salt".to_string(),
            },
        });
        SessionStore::new(cipher)
    }

    #[test]
    fn start_and_get_session_round_trips_plaintext_fields() {
        let store = test_store();
        let id = store.start_session("user-123", "device-abc", Module::CallGuard);
        let view = store.get_session(&id).expect("session exists");
        assert_eq!(view.user_id, "user-123");
        assert_eq!(view.device_id, "device-abc");
        assert_eq!(view.module, Module::CallGuard);
    }

    #[test]
    fn get_session_bumps_last_accessed_at() {
        let store = test_store();
        let id = store.start_session("u", "d", Module::MoneyGuard);
        let first = store.get_session(&id).unwrap().last_accessed_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = store.get_session(&id).unwrap().last_accessed_at;
        assert!(second >= first);
    }

    #[test]
    fn get_session_missing_returns_not_found() {
        let store = test_store();
        let result = store.get_session("does-not-exist");
        assert!(matches!(result, Err(EngineError::NotFound(_))));
    }

    #[test]
    fn append_event_encrypts_sensitive_payload_fields_at_rest() {
        let store = test_store();
        let id = store.start_session("u", "d", Module::IdentityWatch);
        let mut payload = HashMap::new();
        payload.insert("ssn".to_string(), serde_json::json!("123-45-6789"));
        payload.insert("note".to_string(), serde_json::json!("plain text"));
        store
            .append_event(
                &id,
                EventInput {
                    kind: "identity_signals".to_string(),
                    payload,
                    timestamp: Utc::now(),
                },
            )
            .unwrap();

        let raw = store.sessions.lock();
        let stored_event = &raw.get(&id).unwrap().events[0];
        assert_ne!(stored_event.payload["ssn"], serde_json::json!("123-45-6789"));
        assert_eq!(stored_event.payload["note"], serde_json::json!("plain text"));
        drop(raw);

        let view = store.get_session(&id).unwrap();
        assert_eq!(view.events[0].payload["ssn"], serde_json::json!("123-45-6789"));
    }

    #[test]
    fn summarize_without_risk_is_no_evidence() {
        let store = test_store();
        let id = store.start_session("u", "d", Module::CallGuard);
        let result = store.summarize(&id, vec![]);
        assert!(matches!(result, Err(EngineError::NoEvidence { .. })));
    }

    #[test]
    fn evict_idle_removes_only_stale_sessions() {
        let store = test_store();
        let id = store.start_session("u", "d", Module::CallGuard);
        {
            let mut raw = store.sessions.lock();
            raw.get_mut(&id).unwrap().last_accessed_at = Utc::now() - chrono::Duration::hours(100);
        }
        let removed = store.evict_idle(24);
        assert_eq!(removed, 1);
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn evict_idle_disabled_when_ttl_is_zero() {
        let store = test_store();
        store.start_session("u", "d", Module::CallGuard);
        assert_eq!(store.evict_idle(0), 0);
        assert_eq!(store.session_count(), 1);
    }
}
