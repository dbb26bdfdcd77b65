use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::session::{Session, UserProfile, AUTH_TOKEN_KEY, USER_KEY};
use crate::usecase::auth::token::is_token_expired;
use crate::usecase::ports::storage::{KeyValueStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    SignedOut,
    Expired,
    Active(Option<UserProfile>),
}

pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the token and profile once; a malformed profile blob is dropped.
    pub fn load(&self) -> Result<Session, StoreError> {
        let token = self
            .store
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty());
        let user = match self.store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    tracing::warn!(%err, "ignoring malformed user profile");
                    None
                }
            },
            None => None,
        };
        tracing::debug!(has_token = token.is_some(), has_user = user.is_some(), "session loaded");
        Ok(Session { token, user })
    }

    pub fn save(&self, token: &str, user: &UserProfile) -> Result<(), StoreError> {
        let blob = serde_json::to_string(user)
            .map_err(|err| StoreError::Message(format!("failed to encode user profile: {err}")))?;
        self.store.set(AUTH_TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &blob)
    }

    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        tracing::info!("signed out");
        Ok(())
    }
}

pub fn session_status(session: &Session, now: DateTime<Utc>) -> SessionStatus {
    match &session.token {
        None => SessionStatus::SignedOut,
        Some(token) if is_token_expired(token, now) => SessionStatus::Expired,
        Some(_) => SessionStatus::Active(session.user.clone()),
    }
}

impl Session {
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        matches!(session_status(self, now), SessionStatus::Active(_))
    }
}
