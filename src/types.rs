//! Shared domain types returned and consumed at the engine boundary.
//!
//! These mirror `backend/models.py`'s pydantic models field-for-field:
//! `RiskResponse`, `RecommendedAction`, `SafeScript`, and the session/event
//! shapes that the store and dispatcher operate on.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The closed set of product modules. A session's module never changes
/// after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    CallGuard,
    MoneyGuard,
    InboxGuard,
    IdentityWatch,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::CallGuard => "callguard",
            Module::MoneyGuard => "moneyguard",
            Module::InboxGuard => "inboxguard",
            Module::IdentityWatch => "identitywatch",
        }
    }
}

/// `score >= 70` is high, `>= 35` is medium, otherwise low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 35 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub id: String,
    pub title: String,
    pub detail: String,
}

impl RecommendedAction {
    pub fn new(id: &str, title: &str, detail: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            detail: detail.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeScript {
    pub say_this: String,
    pub if_they_push_back: String,
}

impl SafeScript {
    pub fn new(say_this: &str, if_they_push_back: &str) -> Self {
        Self {
            say_this: say_this.to_string(),
            if_they_push_back: if_they_push_back.to_string(),
        }
    }
}

/// Output of every Scorer. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskResponse {
    pub score: u8,
    pub level: RiskLevel,
    pub reasons: Vec<String>,
    pub next_action: String,
    pub recommended_actions: Vec<RecommendedAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_script: Option<SafeScript>,
    pub metadata: HashMap<String, Value>,
}

pub type SessionId = String;
pub type EventId = String;

/// An append-only event in a session's log. Immutable once created; only
/// deleted wholesale by the retention supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: HashMap<String, Value>,
    pub timestamp: DateTime<Utc>,
}

/// What the transport layer submits when appending an event; the store
/// assigns `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: HashMap<String, Value>,
    pub timestamp: DateTime<Utc>,
}

/// A session record, exclusively owned by the `SessionStore`.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub module: Module,
    /// Encrypted at rest; decrypted only in the view returned by `get_session`.
    pub user_id: String,
    /// Encrypted at rest; decrypted only in the view returned by `get_session`.
    pub device_id: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub events: Vec<Event>,
    pub last_risk: Option<RiskResponse>,
}

/// Decrypted view of a session returned to callers (never stored directly).
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub module: Module,
    pub user_id: String,
    pub device_id: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub events: Vec<Event>,
    pub last_risk: Option<RiskResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub module: Module,
    pub created_at: DateTime<Utc>,
    pub last_risk: RiskResponse,
    pub key_takeaways: Vec<String>,
}

pub fn new_session_id() -> SessionId {
    Uuid::new_v4().to_string()
}

pub fn new_event_id() -> EventId {
    Uuid::new_v4().to_string()
}
