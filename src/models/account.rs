use serde::{Deserialize, Serialize};

use super::user::User;

const GENERIC_API_ERROR: &str = "An error occurred. Please try again.";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The sign-up form. `agreed_to_terms` is checked locally and never sent.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age_group: Option<String>,
    pub password: String,
    pub repeat_password: String,
    #[serde(default, skip_serializing)]
    pub agreed_to_terms: bool,
}

impl RegisterRequest {
    /// The checks the sign-up form runs before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if !self.agreed_to_terms {
            return Err("Please agree to the terms and policies".to_string());
        }
        if self.password != self.repeat_password {
            return Err("Passwords don't match".to_string());
        }
        Ok(())
    }
}

/// Body of a successful login or sign-up.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Error body of the account API. Any subset of the fields may be present.
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
    pub non_field_errors: Option<Vec<String>>,
    pub email: Option<Vec<String>>,
    pub password: Option<Vec<String>>,
}

impl ApiErrorBody {
    /// Picks the single message worth showing, most specific field first.
    pub fn message(&self) -> String {
        fn first(list: &Option<Vec<String>>) -> Option<&String> {
            list.as_ref().and_then(|l| l.first())
        }
        self.detail
            .as_ref()
            .or_else(|| first(&self.non_field_errors))
            .or_else(|| first(&self.email))
            .or_else(|| first(&self.password))
            .cloned()
            .unwrap_or_else(|| GENERIC_API_ERROR.to_string())
    }

    /// Parses a raw error body, falling back to the generic message on anything unexpected.
    pub fn message_from_body(body: &str) -> String {
        serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.message())
            .unwrap_or_else(|_| GENERIC_API_ERROR.to_string())
    }
}
