use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::UserProfile;
use crate::services::attendance_service::FormFlavor;
use crate::services::submission_service::Board;

/// How long an issued OAuth `state` stays redeemable.
pub const STATE_TTL: Duration = Duration::from_secs(10 * 60);
/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub participant: Board,
    pub admin: Board,
    last_seen: Instant,
}

impl Session {
    fn new(user: UserProfile) -> Self {
        Self {
            participant: Board::new(&user.name),
            admin: Board::new(&user.name),
            user,
            last_seen: Instant::now(),
        }
    }

    fn is_live(&self, idle_ttl: Duration) -> bool {
        self.last_seen.elapsed() < idle_ttl
    }

    pub fn board(&self, flavor: FormFlavor) -> &Board {
        match flavor {
            FormFlavor::Participant => &self.participant,
            FormFlavor::Admin => &self.admin,
        }
    }

    pub fn board_mut(&mut self, flavor: FormFlavor) -> &mut Board {
        match flavor {
            FormFlavor::Participant => &mut self.participant,
            FormFlavor::Admin => &mut self.admin,
        }
    }
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    pending_states: HashMap<String, Instant>,
}

impl Inner {
    /// Looks up a live session and marks it as used; an idle one is dropped.
    fn touch(&mut self, session_id: &str, idle_ttl: Duration) -> Option<&mut Session> {
        let live = self.sessions.get(session_id)?.is_live(idle_ttl);
        if !live {
            self.sessions.remove(session_id);
            return None;
        }
        let session = self.sessions.get_mut(session_id)?;
        session.last_seen = Instant::now();
        Some(session)
    }
}

/// Every signed-in browser gets its own disconnected set of boards.
/// Nothing here outlives the process.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(SESSION_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            idle_ttl,
        }
    }

    pub fn create(&self, user: UserProfile) -> String {
        let id = Uuid::new_v4().to_string();
        let idle_ttl = self.idle_ttl;
        let mut inner = self.inner.write();
        inner.sessions.retain(|_, s| s.is_live(idle_ttl));
        inner.sessions.insert(id.clone(), Session::new(user));
        id
    }

    pub fn user(&self, session_id: &str) -> Option<UserProfile> {
        self.inner
            .write()
            .touch(session_id, self.idle_ttl)
            .map(|s| s.user.clone())
    }

    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut inner = self.inner.write();
        inner.touch(session_id, self.idle_ttl).map(f)
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.inner.write().sessions.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn issue_state(&self) -> String {
        let state = Uuid::new_v4().simple().to_string();
        let mut inner = self.inner.write();
        inner
            .pending_states
            .retain(|_, issued| issued.elapsed() < STATE_TTL);
        inner.pending_states.insert(state.clone(), Instant::now());
        state
    }

    /// Single use: a redeemed state is gone even if it had expired.
    pub fn take_state(&self, state: &str) -> bool {
        self.inner
            .write()
            .pending_states
            .remove(state)
            .is_some_and(|issued| issued.elapsed() < STATE_TTL)
    }
}
