use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, info};

use super::provider::{AccountProvider, ProfileProvider, SessionError};
use crate::config::ApiConfig;
use crate::models::User;
use crate::models::account::{ApiErrorBody, AuthResponse, LoginRequest, RegisterRequest};

/// Talks to the external account API over HTTP.
pub struct ApiProfileProvider {
    client: Client,
    profile_url: String,
    login_url: String,
    register_url: String,
}

impl ApiProfileProvider {
    pub fn new(config: &ApiConfig) -> Self {
        let base = config.base_url.trim_end_matches('/');
        info!("Creating account API provider for '{}'", base);
        Self {
            client: Client::new(),
            profile_url: format!("{}{}", base, config.profile_path),
            login_url: format!("{}{}", base, config.login_path),
            register_url: format!("{}{}", base, config.register_path),
        }
    }

    async fn post_credentials<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<AuthResponse, SessionError> {
        debug!("Sending account request to: {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        let status = response.status();
        let text = read_body(response).await?;
        if status.is_success() {
            serde_json::from_str::<AuthResponse>(&text)
                .map_err(|e| SessionError::Decode(e.to_string()))
        } else {
            Err(SessionError::Api {
                status: status.as_u16(),
                message: ApiErrorBody::message_from_body(&text),
            })
        }
    }
}

async fn read_body(response: Response) -> Result<String, SessionError> {
    response
        .text()
        .await
        .map_err(|e| SessionError::Network(format!("Error reading response body: {}", e)))
}

#[async_trait::async_trait]
impl ProfileProvider for ApiProfileProvider {
    fn get_name(&self) -> &str {
        "account-api"
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, SessionError> {
        debug!("Sending profile request to: {}", self.profile_url);
        let response = self
            .client
            .get(&self.profile_url)
            .header(AUTHORIZATION, format!("Token {}", token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Rejected(status.as_u16()));
        }
        let body = read_body(response).await?;
        serde_json::from_str::<User>(&body).map_err(|e| SessionError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AccountProvider for ApiProfileProvider {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, SessionError> {
        self.post_credentials(&self.login_url, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, SessionError> {
        request.validate().map_err(SessionError::Invalid)?;
        self.post_credentials(&self.register_url, request).await
    }
}
