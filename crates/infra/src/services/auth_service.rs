//! Session lifecycle: login, registration, profile, refresh and logout.

use std::sync::Arc;

use stickyboard_domain::{
    AuthLoginRequest, AuthLoginResponse, RegisterRequestDto, RegisterResponseDto, SuccessResponse,
    UserSelfDto,
};
use tracing::{info, instrument, warn};

use crate::api::{ApiClient, ApiError, AuthManager, Endpoint};

const LOGIN_PATH: &str = "Auth/login";
const REGISTER_PATH: &str = "Auth/register";
const ME_PATH: &str = "Auth/me";
const LOGOUT_PATH: &str = "Auth/logout";

/// Authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    auth: Arc<AuthManager>,
}

impl AuthService {
    pub fn new(api: ApiClient, auth: Arc<AuthManager>) -> Self {
        Self { api, auth }
    }

    /// Sign in and store the issued tokens
    ///
    /// Any previous session is cleared first so two accounts never mix.
    ///
    /// # Errors
    /// The login call's [`ApiError`]; no tokens are stored in that case.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthLoginResponse, ApiError> {
        self.auth.clear();

        let endpoint = Endpoint::post(LOGIN_PATH)
            .with_body(&AuthLoginRequest::new(email, password))
            .auth(false);
        let response: AuthLoginResponse = self.api.request(&endpoint).await?;

        self.auth.update_tokens(
            Some(response.access_token.clone()),
            Some(response.refresh_token.clone()),
        );
        info!(user_id = %response.user.id, "Logged in");
        Ok(response)
    }

    /// Create an account and store the issued tokens
    ///
    /// # Errors
    /// The register call's [`ApiError`].
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        invite_token: Option<&str>,
    ) -> Result<RegisterResponseDto, ApiError> {
        let body = RegisterRequestDto {
            email: email.to_owned(),
            password: password.to_owned(),
            display_name: display_name.to_owned(),
            invite_token: invite_token.map(str::to_owned),
        };
        let endpoint = Endpoint::post(REGISTER_PATH).with_body(&body).auth(false);
        let response: RegisterResponseDto = self.api.request(&endpoint).await?;

        self.auth.update_tokens(
            Some(response.access_token.clone()),
            Some(response.refresh_token.clone()),
        );
        info!(user_id = %response.user.id, "Registered");
        Ok(response)
    }

    /// Profile of the signed-in user
    ///
    /// # Errors
    /// Any [`ApiError`].
    pub async fn me(&self) -> Result<UserSelfDto, ApiError> {
        self.api.request(&Endpoint::get(ME_PATH)).await
    }

    /// Exchange the refresh token for a new pair (no-op without one)
    ///
    /// # Errors
    /// The refresh call's [`ApiError`]; tokens are cleared in that case.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.api.refresh_session().await
    }

    /// Invalidate the session server-side, then always clear local tokens
    ///
    /// A failed server call is logged and otherwise ignored.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        let endpoint = Endpoint::post(LOGOUT_PATH);
        if let Err(e) = self.api.request::<SuccessResponse>(&endpoint).await {
            warn!(kind = %e.kind(), error = %e, "Logout request failed");
        }

        self.auth.clear();
        info!("Logged out");
    }
}
