//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use stickyboard_common::security::SecretStore;
use stickyboard_common::testing::MockKeychainProvider;
use stickyboard_common::KeychainTokenStore;
use stickyboard_domain::ApiConfig;
use stickyboard_infra::AppContext;
use wiremock::MockServer;

pub const USER_ID: &str = "0b8f2a52-3f0e-4c39-9d43-8d0f61f0b2a1";
pub const BOARD_ID: &str = "6f1c1c9e-5b8a-4d8e-9c55-0d7f3f1f2a10";

/// Mock backend plus a context whose tokens live in an in-memory keychain.
pub struct Harness {
    pub server: MockServer,
    pub keychain: MockKeychainProvider,
    pub ctx: AppContext,
}

impl Harness {
    /// Start a server and seed the keychain with the given tokens.
    pub async fn start(access: Option<&str>, refresh: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let keychain = MockKeychainProvider::new("stickyboard-integration");
        if let Some(access) = access {
            keychain.set_secret("accessToken", access).expect("seed access token");
        }
        if let Some(refresh) = refresh {
            keychain.set_secret("refreshToken", refresh).expect("seed refresh token");
        }

        // Trailing slash exercises separator trimming.
        let config = ApiConfig::new(format!("{}/api/", server.uri()), "Auth/refresh");
        let store = Arc::new(KeychainTokenStore::new(keychain.clone()));
        let ctx = AppContext::with_token_store(config, store).expect("context should build");

        Self { server, keychain, ctx }
    }

    /// Requests the server has seen for `path` (without the `/api` prefix).
    pub async fn requests_to(&self, path: &str) -> Vec<wiremock::Request> {
        let full = format!("/api/{path}");
        self.server
            .received_requests()
            .await
            .expect("request recording enabled")
            .into_iter()
            .filter(|r| r.url.path() == full)
            .collect()
    }
}

pub fn api_path(path: &str) -> String {
    format!("/api/{path}")
}

pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": null, "data": data })
}

pub fn tokens(access: &str, refresh: &str) -> Value {
    envelope(json!({ "accessToken": access, "refreshToken": refresh }))
}

pub fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "ada@example.com",
        "displayName": "Ada",
        "avatarUrl": null,
        "prefs": { "theme": "dark" },
        "createdAt": "2024-01-15 10:30:00"
    })
}

pub fn board_json() -> Value {
    json!({
        "id": BOARD_ID,
        "title": "Roadmap",
        "visibility": 1,
        "ownerId": USER_ID,
        "orgId": null,
        "folderId": null,
        "theme": null,
        "meta": null,
        "createdAt": "2024-05-01T08:00:00.000Z",
        "updatedAt": "2024-05-02T09:15:00.123Z"
    })
}

pub fn error_json(code: i64, message: &str) -> Value {
    json!({ "code": code, "message": message, "details": null })
}

pub fn header<'a>(request: &'a wiremock::Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}
