//! `RetentionSupervisor`: a background task enforcing the store's data
//! retention policy. Mirrors `MemoryStore._cleanup_task` -- a periodic
//! sweep that logs only when it actually removed something -- but as a
//! `tokio::select!` loop with a shutdown channel instead of a daemon
//! thread, following the interval-task pattern the teacher uses for its
//! own background snapshotters.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::RetentionPolicy;
use crate::session::SessionStore;

/// How often the sweep runs. The original ran hourly; kept as-is.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Bound on how long `shutdown` waits for the task to actually stop.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RetentionSupervisor {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RetentionSupervisor {
    /// Spawns the sweep loop, but only if `policy.session_ttl_hours > 0`
    /// (mirrors `memory.py:66-67`'s `if self.session_ttl_hours > 0:
    /// self.start_cleanup_task()`). A ttl of `0` disables the task
    /// entirely -- none of the three sweeps run -- rather than running a
    /// subset of them.
    pub fn spawn(store: SessionStore, policy: RetentionPolicy) -> Option<Self> {
        if policy.session_ttl_hours == 0 {
            return None;
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            ticker.tick().await; // first tick fires immediately; skip it

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweep_once(&store, &policy);
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                }
            }
        });

        Some(Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Signals the sweep loop to stop and waits up to `SHUTDOWN_TIMEOUT`
    /// for it to actually exit.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await;
        }
    }
}

fn sweep_once(store: &SessionStore, policy: &RetentionPolicy) {
    let expired = store.evict_idle(policy.session_ttl_hours);
    let over_age = store.evict_over_age(policy.max_session_age_hours);
    let events_removed = store.evict_old_events(policy.event_retention_days);

    if expired > 0 || over_age > 0 || events_removed > 0 {
        info!(
            expired_sessions = expired,
            old_sessions = over_age,
            events_removed = events_removed,
            "data retention sweep removed stale state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::PayloadCipher;
    use crate::config::{CipherConfig, KeySource};
    use crate::types::Module;

    fn test_store() -> SessionStore {
        let cipher = PayloadCipher::from_config(&CipherConfig {
            enabled: true,
            key_source: KeySource::Derived {
                password: "p".to_string(),
                salt: "s".to_string(),
            },
        });
        SessionStore::new(cipher)
    }

    #[tokio::test]
    async fn sweep_once_removes_nothing_when_store_is_fresh() {
        let store = test_store();
        store.start_session("u", "d", Module::CallGuard);
        let policy = RetentionPolicy {
            session_ttl_hours: 24,
            max_session_age_hours: 48,
            event_retention_days: 30,
            pii_retention_days: 90,
        };
        sweep_once(&store, &policy);
        assert_eq!(store.session_count(), 1);
    }

    #[tokio::test]
    async fn supervisor_shuts_down_within_timeout() {
        let store = test_store();
        let policy = RetentionPolicy {
            session_ttl_hours: 24,
            max_session_age_hours: 48,
            event_retention_days: 30,
            pii_retention_days: 90,
        };
        let mut supervisor = RetentionSupervisor::spawn(store, policy).expect("ttl > 0");
        supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn spawn_returns_none_when_ttl_is_zero() {
        let store = test_store();
        let policy = RetentionPolicy {
            session_ttl_hours: 0,
            max_session_age_hours: 48,
            event_retention_days: 30,
            pii_retention_days: 90,
        };
        assert!(RetentionSupervisor::spawn(store, policy).is_none());
    }
}
