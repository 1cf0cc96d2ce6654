//! Authentication and session identity

mod session;
mod types;

use serde_json::json;

use crate::error::{Error, Result};
use crate::fetch::Transport;
use crate::users::UserProfile;

pub use session::*;
pub use types::*;

/// Client for the authentication endpoints
#[derive(Clone)]
pub struct Auth {
    transport: Transport,
}

impl Auth {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn store(&self) -> &SessionStore {
        self.transport.session()
    }

    /// Sign in with email and password and remember the session
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }

        let tokens = self
            .transport
            .post("auth/login/")
            .json(credentials)?
            .execute::<TokenPair>()
            .await?;

        let refresh = tokens
            .refresh
            .ok_or_else(|| Error::auth("Login response did not include a refresh token"))?;
        let session = Session::from_tokens(&tokens.access, &refresh)?;
        self.store().set(session.clone());

        Ok(session)
    }

    /// Create an account. The new user still has to sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(Error::validation("Email and password are required"));
        }

        self.transport
            .post("auth/register/")
            .json(request)?
            .execute::<UserProfile>()
            .await
    }

    /// Exchange the refresh token for a new access token
    pub async fn refresh(&self) -> Result<Session> {
        let refresh_token = self
            .store()
            .refresh_token()
            .ok_or_else(|| Error::auth("Not logged in"))?;

        let tokens = self
            .transport
            .post("auth/refresh/")
            .json(&json!({ "refresh": refresh_token }))?
            .execute::<TokenPair>()
            .await?;

        let refresh = tokens.refresh.unwrap_or(refresh_token);
        let session = Session::from_tokens(&tokens.access, &refresh)?;
        self.store().set(session.clone());

        Ok(session)
    }

    /// Sign out. The local session is dropped even if the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let refresh_token = match self.store().refresh_token() {
            Some(token) => token,
            None => return Err(Error::auth("Not logged in")),
        };

        let result = self
            .transport
            .post("auth/logout/")
            .json(&json!({ "refresh": refresh_token }))?
            .execute_empty()
            .await;

        self.store().clear();
        result
    }

    /// Profile of the signed-in user
    pub async fn current_user(&self) -> Result<UserProfile> {
        if !self.store().is_authenticated() {
            return Err(Error::auth("Not logged in"));
        }
        self.transport.get("users/me/").execute::<UserProfile>().await
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.store().get()
    }

    /// Set the session, e.g. one restored from disk
    pub fn set_session(&self, session: Session) {
        self.store().set(session);
    }
}
