//! Current-user profile endpoints

use serde::de::IgnoredAny;
use stickyboard_domain::{ChangePasswordDto, UserUpdateDto};

use crate::api::{ApiClient, ApiError, Endpoint};

#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Update display name, avatar or preferences; absent fields are kept
    pub async fn update_self(&self, dto: &UserUpdateDto) -> Result<(), ApiError> {
        let endpoint = Endpoint::put("Users/me").with_body(dto);
        self.api.request::<IgnoredAny>(&endpoint).await.map(|_| ())
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = ChangePasswordDto {
            old_password: old_password.to_owned(),
            new_password: new_password.to_owned(),
        };
        let endpoint = Endpoint::put("Users/me/password").with_body(&body);
        self.api.request::<IgnoredAny>(&endpoint).await.map(|_| ())
    }
}
