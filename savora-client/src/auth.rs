//! Auth API - login and token handling
//!
//! The client only receives and stores tokens; issuance and verification
//! live on the server.

use shared::client::{LoginRequest, LoginResponse};

use crate::{ClientResult, HttpClient};

/// Typed wrapper over the auth endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Login with email and password; the returned token is stored on the
    /// underlying HTTP client for subsequent authenticated calls.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.http.post("auth/login", &request).await?;
        self.http.set_token(Some(response.token.clone()));
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// Drop the stored token
    pub fn logout(&mut self) {
        self.http.set_token(None);
    }

    /// Current token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    /// Access the underlying HTTP client (carries the token)
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
