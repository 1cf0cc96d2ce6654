//! Session management for authentication

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::types::UserId;

/// Session data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The access token
    pub access_token: String,

    /// The refresh token
    pub refresh_token: String,

    /// The user the tokens belong to
    pub user_id: UserId,

    /// The expiry timestamp
    pub expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    sub: Option<serde_json::Value>,
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

impl Session {
    /// Builds a session from a token pair, reading the user and expiry from
    /// the access token's claims.
    ///
    /// The signature is not verified: the server does that on every request,
    /// the client only needs to know whose token it holds.
    pub fn from_tokens(access_token: &str, refresh_token: &str) -> Result<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(access_token, &DecodingKey::from_secret(&[]), &validation)?;
        let claims = data.claims;

        let user_id = claims
            .user_id
            .or(claims.sub)
            .and_then(|value| match value {
                serde_json::Value::Number(n) => n.as_i64(),
                serde_json::Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .ok_or_else(|| Error::auth("Access token does not name a user"))?;

        Ok(Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            user_id,
            expires_at: claims.exp,
        })
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now() >= expires_at,
            None => false,
        }
    }
}

/// Session-lifetime holder of the signed-in identity.
///
/// Cloning shares the same session. Identity changes are published on a
/// watch channel so listing pages can reset when the user changes.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Option<Session>>>,
    identity: Arc<watch::Sender<Option<UserId>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            session: Arc::new(RwLock::new(None)),
            identity: Arc::new(identity),
        }
    }

    /// Get the current session
    pub fn get(&self) -> Option<Session> {
        self.session.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|session| session.refresh_token.clone())
    }

    pub fn user_id(&self) -> Option<UserId> {
        *self.identity.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    /// Set the session
    pub fn set(&self, session: Session) {
        let user_id = session.user_id;
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        self.publish(Some(user_id));
    }

    /// Forget the session
    pub fn clear(&self) {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.publish(None);
    }

    /// Receiver that wakes whenever the signed-in user changes. Token
    /// refreshes for the same user do not wake it.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.identity.subscribe()
    }

    fn publish(&self, user_id: Option<UserId>) {
        let changed = self.identity.send_if_modified(|current| {
            if *current == user_id {
                return false;
            }
            *current = user_id;
            true
        });
        if changed {
            log::info!("Session identity changed to {:?}", user_id);
        }
    }
}
