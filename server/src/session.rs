//! Browser session state for the admin panel and flash messages.
//!
//! Sessions are an explicit capability token: an opaque uuid in a
//! cookie maps to an in-process record holding the admin flag and any
//! pending flash messages. Handlers receive the session through the
//! [`SessionHandle`] extractor instead of reaching into ambient
//! state, which keeps the admin guard testable without a live
//! session backend.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "rhyno_session";

/// Sessions idle for longer than this are dropped on the next sweep.
const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Opaque session identifier handed to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a flash message, mirrored in the rendered CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// Operation succeeded.
    Success,
    /// Operation failed or was rejected.
    Error,
    /// Neutral notice.
    Info,
}

impl FlashKind {
    /// CSS class used when rendering the message.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
            Self::Info => "flash-info",
        }
    }
}

/// A transient message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Message severity.
    pub kind: FlashKind,
    /// Message text.
    pub message: String,
}

impl Flash {
    /// Build a success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// Build an error flash.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Build an info flash.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }
}

/// Per-session state. Ephemeral, never persisted.
#[derive(Debug, Clone)]
struct SessionData {
    /// Whether this session has authenticated as the admin.
    admin: bool,
    /// Flash messages awaiting the next page render.
    flashes: Vec<Flash>,
    /// Last request that presented this session. Drives expiry.
    last_seen: Instant,
}

impl SessionData {
    fn new() -> Self {
        Self {
            admin: false,
            flashes: Vec::new(),
            last_seen: Instant::now(),
        }
    }

    /// Whether the session carries nothing worth keeping.
    fn is_empty(&self) -> bool {
        !self.admin && self.flashes.is_empty()
    }
}

/// In-process session store keyed by [`SessionId`].
///
/// Cheap to clone; the map is shared behind a mutex. Single-process
/// only, which matches the one-instance deployment model of this
/// site. The map is bounded two ways: [`SessionStore::create`] sweeps
/// sessions idle past the store TTL, and the middleware discards
/// fresh sessions that finish their request with nothing in them.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionData>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    /// Create an empty session store with the default idle timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session store with a custom idle timeout.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionData>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a fresh, unauthenticated session.
    ///
    /// Creation doubles as the sweep point: sessions idle past the
    /// TTL are dropped here, so the map cannot grow without bound on
    /// traffic that keeps minting sessions.
    #[must_use]
    pub fn create(&self) -> SessionId {
        let id = SessionId(Uuid::new_v4());
        let mut sessions = self.lock();
        sessions.retain(|_, s| s.last_seen.elapsed() < self.ttl);
        sessions.insert(id, SessionData::new());
        id
    }

    /// Whether a session with this id exists.
    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Refresh a session's idle timer, reporting whether it is live.
    pub fn touch(&self, id: SessionId) -> bool {
        match self.lock().get_mut(&id) {
            Some(session) => {
                session.last_seen = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Drop the session if it holds no admin flag and no flashes.
    ///
    /// Returns `true` when the entry was removed. Called by the
    /// middleware for sessions minted during the current request, so
    /// a plain page hit without a cookie leaves no entry behind.
    pub fn discard_if_empty(&self, id: SessionId) -> bool {
        let mut sessions = self.lock();
        if sessions.get(&id).is_some_and(SessionData::is_empty) {
            sessions.remove(&id);
            true
        } else {
            false
        }
    }

    /// Whether this session carries the admin flag.
    #[must_use]
    pub fn is_admin(&self, id: SessionId) -> bool {
        self.lock().get(&id).is_some_and(|s| s.admin)
    }

    /// Set or clear the admin flag.
    pub fn set_admin(&self, id: SessionId, admin: bool) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.admin = admin;
        }
    }

    /// Queue a flash message for the next rendered page.
    pub fn push_flash(&self, id: SessionId, flash: Flash) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.flashes.push(flash);
        }
    }

    /// Drain all pending flash messages.
    #[must_use]
    pub fn take_flashes(&self, id: SessionId) -> Vec<Flash> {
        self.lock()
            .get_mut(&id)
            .map(|s| std::mem::take(&mut s.flashes))
            .unwrap_or_default()
    }
}

/// Parse the session id out of a `Cookie` header value.
fn session_id_from_cookie(header: &str) -> Option<SessionId> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then_some(value)
        })
        .find_map(|value| Uuid::parse_str(value).ok())
        .map(SessionId)
}

/// Session middleware.
///
/// Resolves the session cookie to a live session, creating one when
/// the cookie is absent or stale, and stores the id in request
/// extensions for the [`SessionHandle`] extractor. A newly created
/// session is handed back to the browser via `Set-Cookie`, but only
/// when the request actually left state in it; an empty fresh session
/// is dropped instead so anonymous page hits do not accumulate
/// entries.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_id_from_cookie)
        .filter(|id| store.touch(*id));

    let (id, is_new) = match existing {
        Some(id) => (id, false),
        None => (store.create(), true),
    };

    request.extensions_mut().insert(id);
    let mut response = next.run(request).await;

    if is_new && !store.discard_if_empty(id) {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Handle on the caller's session.
///
/// Extracted per request; all mutations go through the shared
/// [`SessionStore`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    /// This request's session id.
    pub id: SessionId,
    store: SessionStore,
}

impl SessionHandle {
    /// Build a handle directly. Used by tests; requests get theirs
    /// from the extractor.
    #[must_use]
    pub const fn new(id: SessionId, store: SessionStore) -> Self {
        Self { id, store }
    }

    /// Whether this session has authenticated as the admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.store.is_admin(self.id)
    }

    /// Grant the admin capability to this session.
    pub fn grant_admin(&self) {
        self.store.set_admin(self.id, true);
    }

    /// Revoke the admin capability.
    pub fn revoke_admin(&self) {
        self.store.set_admin(self.id, false);
    }

    /// Queue a flash message for the next rendered page.
    pub fn flash(&self, flash: Flash) {
        self.store.push_flash(self.id, flash);
    }

    /// Drain pending flash messages for rendering.
    #[must_use]
    pub fn take_flashes(&self) -> Vec<Flash> {
        self.store.take_flashes(self.id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::internal("Session middleware not installed"))?;

        Ok(Self::new(id, SessionStore::from_ref(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sessions_are_not_admin() {
        let store = SessionStore::new();
        let id = store.create();
        assert!(store.contains(id));
        assert!(!store.is_admin(id));
    }

    #[test]
    fn admin_flag_can_be_granted_and_revoked() {
        let store = SessionStore::new();
        let id = store.create();

        store.set_admin(id, true);
        assert!(store.is_admin(id));

        store.set_admin(id, false);
        assert!(!store.is_admin(id));
    }

    #[test]
    fn flashes_are_drained_exactly_once() {
        let store = SessionStore::new();
        let id = store.create();

        store.push_flash(id, Flash::success("Login successful"));
        store.push_flash(id, Flash::error("Invalid credentials"));

        let flashes = store.take_flashes(id);
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].kind, FlashKind::Success);
        assert_eq!(flashes[1].message, "Invalid credentials");

        assert!(store.take_flashes(id).is_empty());
    }

    #[test]
    fn unknown_session_ids_have_no_capabilities() {
        let store = SessionStore::new();
        let stale = SessionId(Uuid::new_v4());

        assert!(!store.contains(stale));
        assert!(!store.is_admin(stale));
        assert!(store.take_flashes(stale).is_empty());
    }

    #[test]
    fn idle_sessions_are_swept_when_new_ones_are_created() {
        let store = SessionStore::with_ttl(Duration::ZERO);

        let stale: Vec<_> = (0..50).map(|_| store.create()).collect();
        let fresh = store.create();

        for id in stale {
            assert!(!store.contains(id));
        }
        assert!(store.contains(fresh));
    }

    #[test]
    fn touch_keeps_a_session_alive_and_reports_liveness() {
        let store = SessionStore::new();
        let id = store.create();

        assert!(store.touch(id));
        assert!(!store.touch(SessionId(Uuid::new_v4())));
    }

    #[test]
    fn empty_sessions_are_discarded_but_stateful_ones_kept() {
        let store = SessionStore::new();

        let empty = store.create();
        assert!(store.discard_if_empty(empty));
        assert!(!store.contains(empty));

        let admin = store.create();
        store.set_admin(admin, true);
        assert!(!store.discard_if_empty(admin));
        assert!(store.contains(admin));

        let flashed = store.create();
        store.push_flash(flashed, Flash::info("Logged out"));
        assert!(!store.discard_if_empty(flashed));
        assert!(store.contains(flashed));
    }

    #[test]
    fn session_id_parses_from_cookie_header() {
        let store = SessionStore::new();
        let id = store.create();

        let header = format!("theme=dark; {SESSION_COOKIE}={id}; lang=en");
        assert_eq!(session_id_from_cookie(&header), Some(id));

        assert_eq!(session_id_from_cookie("theme=dark"), None);
        assert_eq!(
            session_id_from_cookie(&format!("{SESSION_COOKIE}=not-a-uuid")),
            None
        );
    }
}
