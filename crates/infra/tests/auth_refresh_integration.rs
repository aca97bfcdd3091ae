//! Integration tests for the single-flight refresh protocol and session
//! bootstrap.

mod support;

use std::time::Duration;

use serde_json::json;
use stickyboard_infra::{with_timeout, ApiError, TransportError};
use support::{api_path, envelope, tokens, user_json, Harness};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn concurrent_rejections_share_one_refresh() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("GET"))
        .and(path(api_path("Boards/mine")))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("Boards/mine")))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(5)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tokens("new", "r2"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let boards = h.ctx.boards.clone();
            tokio::spawn(async move { boards.get_mine().await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.expect("task panicked");
        assert!(result.is_ok(), "request failed: {result:?}");
    }
    assert_eq!(h.keychain.peek("refreshToken").as_deref(), Some("r2"));
}

#[tokio::test]
async fn explicit_refresh_without_token_sends_nothing() {
    let h = Harness::start(Some("a1"), None).await;

    h.ctx.auth.refresh().await.expect("no-op refresh");

    let requests = h.server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
    assert_eq!(h.ctx.auth_manager.current_access_token().as_deref(), Some("a1"));
}

#[tokio::test]
async fn abandoned_refresh_still_commits_tokens() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tokens("new", "r2"))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let err = with_timeout(Duration::from_millis(10), h.ctx.auth.refresh()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
    assert!(err.is_timeout());

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(h.ctx.auth_manager.current_access_token().as_deref(), Some("new"));
    assert_eq!(h.keychain.peek("accessToken").as_deref(), Some("new"));
    assert_eq!(h.keychain.peek("refreshToken").as_deref(), Some("r2"));
}

#[tokio::test]
async fn bootstrap_without_session_is_anonymous() {
    let h = Harness::start(Some("stale-access"), None).await;

    let user = h.ctx.bootstrap().await.expect("bootstrap");

    assert!(user.is_none());
    assert!(!h.ctx.is_authenticated());
    assert!(!h.keychain.secret_exists("accessToken"));
    let requests = h.server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn bootstrap_restores_session() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokens("new", "r2")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("Auth/me")))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json())))
        .expect(1)
        .mount(&h.server)
        .await;

    let user = h.ctx.bootstrap().await.expect("bootstrap").expect("signed in");

    assert_eq!(user.display_name, "Ada");
    assert!(h.ctx.is_authenticated());
}

#[tokio::test]
async fn bootstrap_failure_signs_out() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokens("new", "r2")))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("Auth/me")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&h.server)
        .await;

    let err = h.ctx.bootstrap().await.unwrap_err();

    assert!(matches!(err, ApiError::Unknown { status: Some(500), .. }));
    assert!(!h.ctx.is_authenticated());
    assert!(!h.keychain.secret_exists("refreshToken"));
}

fn delayed_refresh(access: &str, refresh: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(tokens(access, refresh))
        .set_delay(Duration::from_millis(200))
}

#[tokio::test]
async fn logout_during_refresh_stays_logged_out() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(delayed_refresh("resurrected", "r2"))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/logout")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"success": true}))))
        .mount(&h.server)
        .await;

    let auth = h.ctx.auth.clone();
    let pending = tokio::spawn(async move { auth.refresh().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.ctx.logout().await;

    pending.await.expect("task panicked").expect("refresh call itself succeeded");

    assert!(!h.ctx.is_authenticated());
    assert!(!h.keychain.secret_exists("accessToken"));
    assert!(!h.keychain.secret_exists("refreshToken"));
}

#[tokio::test]
async fn login_during_refresh_keeps_the_new_account() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(delayed_refresh("old-account", "old-refresh"))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "accessToken": "new-account",
            "refreshToken": "new-refresh",
            "user": user_json()
        }))))
        .mount(&h.server)
        .await;

    let auth = h.ctx.auth.clone();
    let pending = tokio::spawn(async move { auth.refresh().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.ctx.auth.login("ada@example.com", "hunter2").await.expect("login");

    pending.await.expect("task panicked").expect("refresh call itself succeeded");

    assert_eq!(h.ctx.auth_manager.current_access_token().as_deref(), Some("new-account"));
    assert_eq!(h.keychain.peek("accessToken").as_deref(), Some("new-account"));
    assert_eq!(h.keychain.peek("refreshToken").as_deref(), Some("new-refresh"));
}
