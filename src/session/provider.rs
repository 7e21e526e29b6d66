use crate::models::User;
use crate::models::account::{AuthResponse, LoginRequest, RegisterRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("profile request rejected with status {0}")]
    Rejected(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("profile request timed out after {0} ms")]
    Timeout(u64),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Invalid(String),
}

impl SessionError {
    /// The text shown to the person using the shell.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api { message, .. } | SessionError::Invalid(message) => message.clone(),
            SessionError::Network(_) | SessionError::Timeout(_) => {
                "Network error. Please try again.".to_string()
            }
            SessionError::Rejected(_) | SessionError::Decode(_) => {
                "Your session has expired. Please log in again.".to_string()
            }
        }
    }
}

/// A source of user profiles, keyed by auth token.
#[async_trait::async_trait]
pub trait ProfileProvider: Send + Sync {
    fn get_name(&self) -> &str;

    /// Exchanges a token for the profile it belongs to. Exactly one attempt.
    async fn fetch_profile(&self, token: &str) -> Result<User, SessionError>;
}

/// Credential exchange: turns a login or sign-up form into a token and user.
#[async_trait::async_trait]
pub trait AccountProvider: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, SessionError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, SessionError>;
}
