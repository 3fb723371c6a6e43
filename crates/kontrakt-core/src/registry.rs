//! Session registry: conversation identity -> exclusively owned session.
//!
//! Replaces implicit process-global dispatcher state with an explicit map.
//! Each session sits behind its own `tokio::Mutex`; holding the lock across a
//! whole transition (including finalize's external calls) makes event
//! processing per session strictly sequential, so at most one finalize is
//! ever outstanding and later events queue behind it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use kontrakt_types::session::IntakeSession;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<IntakeSession>>;

/// Concurrent map of active sessions, keyed by conversation identity.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for a conversation, creating an idle one if absent.
    pub fn obtain(&self, conversation_id: &str) -> SessionHandle {
        self.sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(IntakeSession::new(conversation_id))))
            .clone()
    }

    /// Get an existing session, if any.
    pub fn get(&self, conversation_id: &str) -> Option<SessionHandle> {
        self.sessions
            .get(conversation_id)
            .map(|entry| entry.value().clone())
    }

    /// Drop a session (completion, or explicit eviction).
    pub fn remove(&self, conversation_id: &str) {
        self.sessions.remove(conversation_id);
    }

    /// Evict sessions idle longer than `max_idle`. Returns the eviction count.
    ///
    /// Sessions whose lock is currently held (a transition in flight) are
    /// never evicted.
    pub fn evict_idle(&self, max_idle: chrono::Duration) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => {
                if session.idle_for() > max_idle {
                    evicted += 1;
                    false
                } else {
                    true
                }
            }
            Err(_) => true,
        });
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle sessions");
        }
        evicted
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
    use chrono::Duration;

    #[tokio::test]
    async fn test_obtain_creates_once() {
        let registry = SessionRegistry::new();
        let first = registry.obtain("chat-1");
        let second = registry.obtain("chat-1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_get_does_not_create() {
        let registry = SessionRegistry::new();
        assert!(registry.get("chat-1").is_none());
        registry.obtain("chat-1");
        assert!(registry.get("chat-1").is_some());
    }

    #[tokio::test]
    async fn test_remove_evicts() {
        let registry = SessionRegistry::new();
        registry.obtain("chat-1");
        registry.remove("chat-1");
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_evict_idle_only_touches_stale_sessions() {
        let registry = SessionRegistry::new();
        let stale = registry.obtain("stale");
        registry.obtain("fresh");

        stale.lock().await.last_activity = chrono::Utc::now() - Duration::hours(2);

        let evicted = registry.evict_idle(Duration::hours(1));
        assert_eq!(evicted, 1);
        assert!(registry.get("stale").is_none());
        assert!(registry.get("fresh").is_some());
    }

    #[tokio::test]
    async fn test_evict_idle_skips_locked_sessions() {
        let registry = SessionRegistry::new();
        let handle = registry.obtain("busy");
        handle.lock().await.last_activity = chrono::Utc::now() - Duration::hours(2);

        let guard = handle.lock().await;
        let evicted = registry.evict_idle(Duration::hours(1));
        drop(guard);

        assert_eq!(evicted, 0);
        assert!(registry.get("busy").is_some());
    }
}
