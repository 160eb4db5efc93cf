//! Session store mapping users to their recipe session

use super::store::RecipeSession;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Handle to a session held in the store
pub type SharedSession = Arc<Mutex<RecipeSession>>;

struct StoreEntry {
    session: SharedSession,
    last_used: u64,
}

#[derive(Default)]
struct StoreInner {
    entries: HashMap<String, StoreEntry>,
    tick: u64,
}

impl StoreInner {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// Keyed registry holding at most one recipe session per user
///
/// `assign` and `lookup` are serialized by a single lock, and each session
/// has its own mutex so cursor updates for one user never touch another.
/// When `max_sessions` is set, assigning a session for a new user while the
/// store is full evicts the least recently used entry.
pub struct SessionStore {
    inner: Mutex<StoreInner>,
    max_sessions: Option<usize>,
}

impl SessionStore {
    /// Create an unbounded session store
    pub fn new() -> Self {
        Self::with_max_sessions(None)
    }

    /// Create a store that keeps at most `max_sessions` users
    pub fn with_max_sessions(max_sessions: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            max_sessions,
        }
    }

    /// Assign a session to a user, replacing any previous one wholesale
    pub fn assign(&self, user: impl Into<String>, session: RecipeSession) -> SharedSession {
        let user = user.into();
        let shared = Arc::new(Mutex::new(session));

        let mut inner = self.inner.lock();
        if let Some(max) = self.max_sessions {
            if !inner.entries.contains_key(&user) && inner.entries.len() >= max {
                evict_least_recent(&mut inner);
            }
        }

        let last_used = inner.next_tick();
        let replaced = inner
            .entries
            .insert(
                user.clone(),
                StoreEntry {
                    session: Arc::clone(&shared),
                    last_used,
                },
            )
            .is_some();
        debug!(user = %user, replaced, "Assigned recipe session");

        shared
    }

    /// Get the session for a user, if they have completed a search
    pub fn lookup(&self, user: &str) -> Option<SharedSession> {
        let mut inner = self.inner.lock();
        let tick = inner.next_tick();
        inner.entries.get_mut(user).map(|entry| {
            entry.last_used = tick;
            Arc::clone(&entry.session)
        })
    }

    /// Check whether a user has a session
    pub fn contains(&self, user: &str) -> bool {
        self.inner.lock().entries.contains_key(user)
    }

    /// Number of users with a session
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Configured capacity limit
    pub fn max_sessions(&self) -> Option<usize> {
        self.max_sessions
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn evict_least_recent(inner: &mut StoreInner) {
    let oldest = inner
        .entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_used)
        .map(|(user, _)| user.clone());

    if let Some(user) = oldest {
        inner.entries.remove(&user);
        debug!(user = %user, "Evicted least recently used recipe session");
    }
}
