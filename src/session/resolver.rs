use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use super::provider::{AccountProvider, ProfileProvider, SessionError};
use crate::models::User;
use crate::models::account::{AuthResponse, LoginRequest, RegisterRequest};

/// Turns a stored token into a `User`, or into the reason there is none.
///
/// The resolver never touches storage. Any `Err` it returns means the token is
/// no longer usable and the caller has to clear it.
pub struct SessionResolver {
    profiles: Arc<dyn ProfileProvider>,
    accounts: Arc<dyn AccountProvider>,
    timeout_in_ms: u64,
    default_avatar: String,
}

impl SessionResolver {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        accounts: Arc<dyn AccountProvider>,
        timeout_in_ms: u64,
        default_avatar: impl Into<String>,
    ) -> Self {
        Self {
            profiles,
            accounts,
            timeout_in_ms,
            default_avatar: default_avatar.into(),
        }
    }

    fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }

    /// One profile request, no retry.
    pub async fn resolve(&self, token: &str) -> Result<User, SessionError> {
        let fetched = timeout(self.timeout_duration(), self.profiles.fetch_profile(token))
            .await
            .unwrap_or(Err(SessionError::Timeout(self.timeout_in_ms)));

        match fetched {
            Ok(user) => {
                info!(
                    "Provider '{}' resolved session for user id {}",
                    self.profiles.get_name(),
                    user.id
                );
                Ok(user.with_default_avatar(&self.default_avatar))
            }
            Err(e) => {
                warn!(
                    "Provider '{}' could not resolve session: {}",
                    self.profiles.get_name(),
                    e
                );
                Err(e)
            }
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, SessionError> {
        let auth = timeout(self.timeout_duration(), self.accounts.login(request))
            .await
            .unwrap_or(Err(SessionError::Timeout(self.timeout_in_ms)))?;
        Ok(self.finish(auth))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, SessionError> {
        let auth = timeout(self.timeout_duration(), self.accounts.register(request))
            .await
            .unwrap_or(Err(SessionError::Timeout(self.timeout_in_ms)))?;
        Ok(self.finish(auth))
    }

    fn finish(&self, auth: AuthResponse) -> AuthResponse {
        AuthResponse {
            token: auth.token,
            user: auth.user.with_default_avatar(&self.default_avatar),
        }
    }
}
