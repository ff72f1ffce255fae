//! Session Store — one in-progress application per session id.
//!
//! The map lock is held only to look up or insert a session. Each session
//! has its own lock, so work on one session never blocks another. Generation
//! handlers snapshot the profile, release the lock for the service calls,
//! then store the finished artifact in a single assignment.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::documents::{GeneratedCoverLetter, GeneratedResume};
use crate::models::profile::CareerProfile;

pub mod handlers;
pub mod interchange;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: CareerProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<GeneratedResume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<GeneratedCoverLetter>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            profile: CareerProfile::default(),
            resume: None,
            cover_letter: None,
            created_at: Utc::now(),
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(Session::new(id))));
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Copy of the session's profile, taken under its lock.
    pub async fn profile(&self, id: Uuid) -> Result<CareerProfile, AppError> {
        let handle = self.get(id).await?;
        let session = handle.lock().await;
        Ok(session.profile.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let store = SessionStore::new();
        let id = store.create().await;
        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.id, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let result = store.get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;

        let handle = store.get(a).await.unwrap();
        let _held = handle.lock().await;
        // b stays reachable while a is locked
        let other = store.profile(b).await.unwrap();
        assert_eq!(other, CareerProfile::default());
    }
}
