//! Environment-driven configuration, following the teacher's
//! `Config::from_env()` convention: `dotenv().ok()` once, then per-field
//! `std::env::var(..).unwrap_or_else(..).parse().unwrap_or(default)`.

/// Retention knobs for the in-memory store and its background supervisor.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    /// Hours of inactivity before a session is evicted. `0` disables
    /// idle-expiry entirely.
    pub session_ttl_hours: u64,
    /// Hard cap on session age regardless of activity.
    pub max_session_age_hours: u64,
    /// Events older than this are dropped from a session's log.
    pub event_retention_days: u64,
    /// Reserved for PII-specific retention; currently applied the same way
    /// as `event_retention_days` since events are the only PII-bearing store.
    pub pii_retention_days: u64,
}

impl RetentionPolicy {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let session_ttl_hours = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let max_session_age_hours = std::env::var("MAX_SESSION_AGE_HOURS")
            .unwrap_or_else(|_| "48".to_string())
            .parse()
            .unwrap_or(48);

        let event_retention_days = std::env::var("EVENT_RETENTION_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let pii_retention_days = std::env::var("PII_RETENTION_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .parse()
            .unwrap_or(90);

        Self {
            session_ttl_hours,
            max_session_age_hours,
            event_retention_days,
            pii_retention_days,
        }
    }
}

/// Where `PayloadCipher` gets its key from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// A 32-byte key supplied directly, base64-encoded in the environment.
    Direct(String),
    /// A password + salt pair to run through PBKDF2-SHA256.
    Derived { password: String, salt: String },
}

#[derive(Debug, Clone)]
pub struct CipherConfig {
    pub enabled: bool,
    pub key_source: KeySource,
}

impl CipherConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let enabled = std::env::var("ENABLE_DATA_ENCRYPTION")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let key_source = match std::env::var("SESSION_ENCRYPTION_KEY") {
            Ok(key) => KeySource::Direct(key),
            Err(_) => {
                let password = std::env::var("SESSION_ENCRYPTION_PASSWORD")
                    .unwrap_or_else(|_| "guardian-dev-password".to_string());
                let salt = std::env::var("SESSION_ENCRYPTION_SALT")
                    .unwrap_or_else(|_| "guardian-dev-salt".to_string());
                KeySource::Derived { password, salt }
            }
        };

        Self { enabled, key_source }
    }
}
