//! Sign-in, registration and sign-out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::ApiClient;
use crate::error::{failure_message, ApiError, ApiResult};

pub const LOGIN_PATH: &str = "/login/";
pub const REGISTER_PATH: &str = "/register/";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
}

impl ApiClient {
    /// Exchange credentials for a token pair.
    ///
    /// Every rejection is reported as [`ApiError::InvalidCredentials`]
    /// whatever the server said.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let body = serde_json::to_string(&LoginRequest { username, password })?;
        let response = self.http().execute(&self.json_post(LOGIN_PATH, body)).await?;

        if !response.is_success() {
            info!(status = response.status, "Login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let tokens: LoginResponse = response.json()?;
        self.set_tokens(tokens.access, tokens.refresh).await;
        info!(username, "Signed in");
        Ok(())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<()> {
        let body = serde_json::to_string(&RegisterRequest {
            username,
            email,
            password,
        })?;
        let response = self
            .http()
            .execute(&self.json_post(REGISTER_PATH, body))
            .await?;

        if !response.is_success() {
            let message = failure_message(response.status, &response.body);
            debug!(status = response.status, %message, "Registration rejected");
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        info!(username, "Registered");
        Ok(())
    }

    pub async fn register_and_login(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<()> {
        self.register(username, email, password).await?;
        self.login(username, password).await
    }

    /// Drop the held tokens. The backend keeps no session to end.
    pub async fn logout(&self) {
        self.clear_tokens().await;
        info!("Signed out");
    }
}
