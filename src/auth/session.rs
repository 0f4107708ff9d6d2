//! In-memory sessions carrying the signed-in user and pending flash messages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;

/// Severity of a flash message, used as its CSS class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashLevel::Success => "alert-success",
            FlashLevel::Error => "alert-danger",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Default)]
struct SessionData {
    user_id: Option<i32>,
    flashes: Vec<Flash>,
}

/// Storage for all live sessions, keyed by the id in the session cookie.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop the session when it has no user and no pending flashes.
    /// Returns true when it was removed.
    pub async fn discard_if_empty(&self, id: Uuid) -> bool {
        let mut sessions = self.sessions.lock().await;
        let empty = sessions
            .get(&id)
            .is_some_and(|data| data.user_id.is_none() && data.flashes.is_empty());
        if empty {
            sessions.remove(&id);
        }
        empty
    }

    /// Sign `user_id` out of every session. Used when the account is deleted.
    pub async fn forget_user(&self, user_id: i32) {
        let mut sessions = self.sessions.lock().await;
        for data in sessions.values_mut() {
            if data.user_id == Some(user_id) {
                data.user_id = None;
            }
        }
    }
}

/// Handle to the session of the current request.
///
/// The session is created lazily: a request that never writes to it gets no
/// cookie. The id may also change during the request (see [`Session::login`]);
/// the session middleware compares [`Session::id`] before and after the
/// handler to decide whether to send a new cookie.
#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    id: Arc<StdMutex<Option<Uuid>>>,
}

impl Session {
    /// Attach to an existing session id, or to no session at all.
    pub fn new(store: SessionStore, id: Option<Uuid>) -> Self {
        Self {
            store,
            id: Arc::new(StdMutex::new(id)),
        }
    }

    /// Current session id, if the session exists.
    pub fn id(&self) -> Option<Uuid> {
        self.id.lock().map(|id| *id).unwrap_or(None)
    }

    fn set_id(&self, new_id: Uuid) {
        if let Ok(mut id) = self.id.lock() {
            *id = Some(new_id);
        }
    }

    /// Id of the signed-in user.
    pub async fn user_id(&self) -> Option<i32> {
        let id = self.id()?;
        self.store.sessions.lock().await.get(&id).and_then(|data| data.user_id)
    }

    /// Sign `user_id` in. The session gets a fresh id so an id handed out
    /// before authentication cannot be reused.
    pub async fn login(&self, user_id: i32) {
        let mut sessions = self.store.sessions.lock().await;
        let mut data = self.id().and_then(|id| sessions.remove(&id)).unwrap_or_default();
        data.user_id = Some(user_id);

        let new_id = Uuid::new_v4();
        sessions.insert(new_id, data);
        self.set_id(new_id);
    }

    /// Sign the user out, keeping pending flash messages.
    pub async fn logout(&self) {
        let mut sessions = self.store.sessions.lock().await;
        let Some(old_id) = self.id() else {
            return;
        };
        let mut data = sessions.remove(&old_id).unwrap_or_default();
        data.user_id = None;

        let new_id = Uuid::new_v4();
        sessions.insert(new_id, data);
        self.set_id(new_id);
    }

    /// Queue a flash message for the next rendered page.
    pub async fn flash(&self, level: FlashLevel, message: impl Into<String>) {
        let mut sessions = self.store.sessions.lock().await;
        let id = match self.id() {
            Some(id) if sessions.contains_key(&id) => id,
            _ => {
                let id = Uuid::new_v4();
                sessions.insert(id, SessionData::default());
                self.set_id(id);
                id
            }
        };
        if let Some(data) = sessions.get_mut(&id) {
            data.flashes.push(Flash {
                level,
                message: message.into(),
            });
        }
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.flash(FlashLevel::Success, message).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.flash(FlashLevel::Error, message).await;
    }

    /// Remove and return the pending flash messages.
    pub async fn take_flashes(&self) -> Vec<Flash> {
        let Some(id) = self.id() else {
            return Vec::new();
        };
        self.store
            .sessions
            .lock()
            .await
            .get_mut(&id)
            .map(|data| std::mem::take(&mut data.flashes))
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))
    }
}
