use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::report::DraftStore;

/// Opaque per-browser-session identifier, stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn generate() -> Self {
        Self(super::generate_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Logs only a short prefix so full keys never reach the log output.
impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "{prefix}...")
    }
}

/// Shared handle to one session's [`DraftStore`].
#[derive(Debug, Clone, Default)]
pub struct DraftHandle(Arc<Mutex<DraftStore>>);

impl DraftHandle {
    /// Run `f` with exclusive access to the store. Keep `f` synchronous; the
    /// guard must not be held across an `.await`.
    pub fn with<R>(&self, f: impl FnOnce(&mut DraftStore) -> R) -> R {
        let mut store = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut store)
    }
}

#[derive(Debug)]
struct Entry {
    handle: DraftHandle,
    touched: Instant,
}

/// One draft per editing session, created on first use and dropped when the
/// session closes or goes idle.
#[derive(Debug, Clone, Default)]
pub struct DraftRegistry {
    drafts: Arc<Mutex<HashMap<SessionKey, Entry>>>,
}

impl DraftRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session's draft, creating a pristine one if none exists.
    pub fn open(&self, key: &SessionKey) -> DraftHandle {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        let entry = map.entry(key.clone()).or_insert_with(|| {
            log::info!("Opened report draft for session {key}");
            Entry {
                handle: DraftHandle::default(),
                touched: Instant::now(),
            }
        });
        entry.touched = Instant::now();
        entry.handle.clone()
    }

    pub fn get(&self, key: &SessionKey) -> Option<DraftHandle> {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        map.get_mut(key).map(|entry| {
            entry.touched = Instant::now();
            entry.handle.clone()
        })
    }

    /// Drop the session's draft. Returns whether one existed.
    pub fn discard(&self, key: &SessionKey) -> bool {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        let removed = map.remove(key).is_some();
        if removed {
            log::info!("Discarded report draft for session {key}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop drafts untouched for at least `max_idle`. Returns how many went.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let before = map.len();
        map.retain(|_, entry| now.duration_since(entry.touched) < max_idle);
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ContractContext, DraftField};

    #[test]
    fn open_returns_the_same_draft_for_a_session() {
        let registry = DraftRegistry::new();
        let key = SessionKey::new("session-a");

        registry
            .open(&key)
            .with(|store| store.set(DraftField::ContractId, "abc123"));
        let again = registry.open(&key).with(|store| store.snapshot());

        assert_eq!(again.contract_id, "abc123");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sessions_never_share_a_draft() {
        let registry = DraftRegistry::new();
        let a = SessionKey::new("session-a");
        let b = SessionKey::new("session-b");

        registry.open(&a).with(|store| {
            store.import_context(&ContractContext {
                contract_id: "CO1.PCCNTR.111111".to_string(),
                entity: "Entidad A".to_string(),
                amount: "$10".to_string(),
            })
        });

        let other = registry.open(&b).with(|store| store.snapshot());
        assert_eq!(other.contract_id, "");
        assert!(!other.is_valid_contract_id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn get_does_not_create() {
        let registry = DraftRegistry::new();
        assert!(registry.get(&SessionKey::new("missing")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn discard_drops_the_draft_and_closes_subscribers() {
        let registry = DraftRegistry::new();
        let key = SessionKey::new("session-a");
        let mut rx = registry.open(&key).with(|store| store.subscribe());

        assert!(registry.discard(&key));
        assert!(!registry.discard(&key));
        assert!(registry.get(&key).is_none());
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn sweep_only_removes_idle_drafts() {
        let registry = DraftRegistry::new();
        registry.open(&SessionKey::new("a"));
        registry.open(&SessionKey::new("b"));

        assert_eq!(registry.sweep_idle(Duration::from_secs(3600)), 0);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.sweep_idle(Duration::ZERO), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn generated_keys_are_distinct_and_display_is_truncated() {
        let a = SessionKey::generate();
        let b = SessionKey::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert_eq!(a.to_string().len(), 11);
    }
}
