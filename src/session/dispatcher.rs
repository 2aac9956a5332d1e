//! Dispatcher: picks module-specific evidence out of a session's event log
//! and invokes the matching Scorer. Mirrors `_assess_session_risk` in the
//! original FastAPI service, including its per-module evidence-selection
//! rules and the `NoEvidence` case for InboxGuard.

use crate::error::{EngineError, EngineResult};
use crate::scorers::inboxguard::{self, url as inbox_url, TextEvidence};
use crate::scorers::{callguard, identitywatch, moneyguard};
use crate::session::SessionStore;
use crate::types::{Event, Module, RiskResponse};

#[derive(Clone)]
pub struct Dispatcher {
    store: SessionStore,
}

impl Dispatcher {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Re-scores a session from its current event log, grounded in its
    /// module, and persists the result as `last_risk`.
    pub fn assess_session(&self, session_id: &str) -> EngineResult<RiskResponse> {
        let module = self.store.module_of(session_id)?;
        let events = self.store.decrypted_events(session_id)?;

        let risk = match module {
            Module::CallGuard => self.assess_callguard(&events),
            Module::MoneyGuard => self.assess_moneyguard(&events)?,
            Module::InboxGuard => self.assess_inboxguard(&events)?,
            Module::IdentityWatch => self.assess_identitywatch(&events),
        };

        self.store.update_last_risk(session_id, risk.clone())?;
        Ok(risk)
    }

    fn assess_callguard(&self, events: &[Event]) -> RiskResponse {
        let signals: Vec<String> = events
            .iter()
            .filter(|e| e.kind == "signal")
            .filter_map(|e| e.payload.get("signal_key"))
            .filter_map(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty())
            .collect();
        callguard::assess(&signals)
    }

    fn assess_moneyguard(&self, events: &[Event]) -> EngineResult<RiskResponse> {
        let latest = events.iter().rev().find(|e| e.kind == "assess");
        let evidence = match latest {
            Some(event) => serde_json::from_value(serde_json::Value::Object(
                event.payload.clone().into_iter().collect(),
            ))
            .map_err(|e| EngineError::Internal(e.to_string()))?,
            None => moneyguard::MoneyGuardEvidence::default(),
        };
        Ok(moneyguard::assess(&evidence))
    }

    fn assess_inboxguard(&self, events: &[Event]) -> EngineResult<RiskResponse> {
        let latest = events
            .iter()
            .rev()
            .find(|e| e.kind == "text" || e.kind == "url");

        match latest {
            Some(event) if event.kind == "text" => {
                let text = event
                    .payload
                    .get("text")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                let channel = event
                    .payload
                    .get("channel")
                    .and_then(|v| v.as_str())
                    .unwrap_or("other");
                Ok(inboxguard::analyze_text(&TextEvidence { text, channel }))
            }
            Some(event) if event.kind == "url" => {
                let url = event
                    .payload
                    .get("url")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                Ok(inbox_url::analyze_url(url))
            }
            _ => Err(EngineError::NoEvidence {
                module: Module::InboxGuard.as_str(),
            }),
        }
    }

    fn assess_identitywatch(&self, events: &[Event]) -> RiskResponse {
        let latest = events.iter().rev().find(|e| e.kind == "signals");
        let evidence = match latest {
            Some(event) => serde_json::from_value(serde_json::Value::Object(
                event.payload.clone().into_iter().collect(),
            ))
            .unwrap_or_default(),
            None => identitywatch::IdentityWatchEvidence::default(),
        };
        identitywatch::assess(&evidence)
    }
}
