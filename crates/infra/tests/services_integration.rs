//! Integration tests for the typed resource services.

mod support;

use serde_json::json;
use stickyboard_domain::{CardStatus, CardType, SectionMoveDto, UserUpdateDto};
use stickyboard_infra::ApiError;
use support::{api_path, envelope, header, tokens, user_json, Harness, BOARD_ID, USER_ID};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const TAB_ID: &str = "1a2b3c4d-5e6f-4a1b-8c2d-3e4f5a6b7c8d";
const SECTION_ID: &str = "2b3c4d5e-6f7a-4b2c-9d3e-4f5a6b7c8d9e";

fn id(raw: &str) -> Uuid {
    raw.parse().expect("valid uuid")
}

fn mutation_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(json!({"success": true})))
}

fn login_body(access: &str, refresh: &str) -> serde_json::Value {
    envelope(json!({ "accessToken": access, "refreshToken": refresh, "user": user_json() }))
}

#[tokio::test]
async fn login_replaces_the_session() {
    let h = Harness::start(Some("previous"), Some("previous-refresh")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/login")))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("a1", "r1")))
        .expect(1)
        .mount(&h.server)
        .await;

    let response = h.ctx.auth.login("ada@example.com", "hunter2").await.expect("login");

    assert_eq!(response.user.id, id(USER_ID));
    assert_eq!(header(&h.requests_to("Auth/login").await[0], "authorization"), None);
    assert_eq!(h.ctx.auth_manager.current_access_token().as_deref(), Some("a1"));
    assert_eq!(h.keychain.peek("refreshToken").as_deref(), Some("r1"));
}

#[tokio::test]
async fn failed_login_leaves_no_session() {
    let h = Harness::start(Some("previous"), Some("previous-refresh")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/login")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(support::error_json(1, "bad credentials")),
        )
        .mount(&h.server)
        .await;

    let err = h.ctx.auth.login("ada@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::AuthInvalid(Some(ref m)) if m == "bad credentials"));
    assert!(!h.ctx.is_authenticated());
    assert!(!h.keychain.secret_exists("refreshToken"));
}

#[tokio::test]
async fn register_omits_missing_invite_token() {
    let h = Harness::start(None, None).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/register")))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "displayName": "Ada"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body("a1", "r1")))
        .expect(1)
        .mount(&h.server)
        .await;

    h.ctx.auth.register("ada@example.com", "hunter2", "Ada", None).await.expect("register");

    assert!(h.ctx.is_authenticated());
}

#[tokio::test]
async fn logout_clears_tokens_even_when_the_server_fails() {
    let h = Harness::start(Some("a1"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/logout")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    h.ctx.logout().await;

    assert!(!h.ctx.is_authenticated());
    assert!(!h.keychain.secret_exists("accessToken"));
    assert!(!h.keychain.secret_exists("refreshToken"));
}

#[tokio::test]
async fn board_mutations_use_their_routes() {
    let h = Harness::start(Some("a1"), Some("r1")).await;
    let created = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
    Mock::given(method("POST"))
        .and(path(api_path("Boards")))
        .and(body_json(json!({"title": "Roadmap", "visibility": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"id": created}))))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api_path(&format!("Boards/{BOARD_ID}/rename"))))
        .and(body_json(json!({"title": "Q3 Roadmap"})))
        .respond_with(mutation_ok())
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api_path(&format!("Boards/{BOARD_ID}/folder"))))
        .and(body_json(json!({"folderId": null})))
        .respond_with(mutation_ok())
        .expect(1)
        .mount(&h.server)
        .await;

    let dto = stickyboard_domain::BoardCreateDto::new(
        "Roadmap",
        stickyboard_domain::BoardVisibility::Private,
    );
    assert_eq!(h.ctx.boards.create(&dto).await.expect("create"), id(created));
    h.ctx.boards.rename(id(BOARD_ID), "Q3 Roadmap").await.expect("rename");
    h.ctx.boards.move_to_folder(id(BOARD_ID), None).await.expect("move out of folder");
}

#[tokio::test]
async fn mutation_without_data_fails_closed() {
    let h = Harness::start(Some("a1"), None).await;
    Mock::given(method("DELETE"))
        .and(path(api_path(&format!("Boards/{BOARD_ID}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&h.server)
        .await;

    let err = h.ctx.boards.delete(id(BOARD_ID)).await.unwrap_err();
    assert!(matches!(err, ApiError::Decoding(_)));
}

#[tokio::test]
async fn tabs_and_sections_move_with_position_bodies() {
    let h = Harness::start(Some("a1"), None).await;
    Mock::given(method("PUT"))
        .and(path(api_path(&format!("Tabs/{TAB_ID}/move"))))
        .and(body_json(json!({"newPosition": 3})))
        .respond_with(mutation_ok())
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path(&format!("Sections/{SECTION_ID}/move"))))
        .and(body_json(json!({"newPosition": 0, "parentSectionId": TAB_ID})))
        .respond_with(mutation_ok())
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path(&format!("Tabs/board/{BOARD_ID}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": TAB_ID,
            "boardId": BOARD_ID,
            "title": "Backlog",
            "tabType": 3,
            "position": 0,
            "layout": null
        }]))))
        .mount(&h.server)
        .await;

    h.ctx.tabs.move_tab(id(TAB_ID), 3).await.expect("move tab");
    let dto = SectionMoveDto { new_position: 0, parent_section_id: Some(id(TAB_ID)) };
    h.ctx.sections.move_section(id(SECTION_ID), &dto).await.expect("move section");

    let tabs = h.ctx.tabs.get_for_board(id(BOARD_ID)).await.expect("tabs");
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].title, "Backlog");
}

#[tokio::test]
async fn cards_by_tab_decode_enums_and_dates() {
    let h = Harness::start(Some("a1"), None).await;
    Mock::given(method("GET"))
        .and(path(api_path(&format!("Cards/tab/{TAB_ID}"))))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": "3c4d5e6f-7a8b-4c3d-8e4f-5a6b7c8d9e0f",
            "boardId": BOARD_ID,
            "tabId": TAB_ID,
            "sectionId": null,
            "type": "1",
            "title": "Ship it",
            "tags": ["release"],
            "status": 1,
            "priority": 2,
            "dueDate": "2024-06-01 12:00:00",
            "updatedAt": "2024-05-30T10:00:00Z"
        }]))))
        .mount(&h.server)
        .await;

    let cards = h.ctx.cards.get_by_tab(id(TAB_ID)).await.expect("cards");

    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.card_type, CardType::Task);
    assert_eq!(card.status, CardStatus::InProgress);
    assert_eq!(card.tags, vec!["release".to_string()]);
    assert!(card.due_date.is_some());
    assert!(card.start_time.is_none());
}

#[tokio::test]
async fn profile_updates_tolerate_missing_data() {
    let h = Harness::start(Some("a1"), None).await;
    Mock::given(method("PUT"))
        .and(path(api_path("Users/me")))
        .and(body_json(json!({"displayName": "Ada L."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("Users/me/password")))
        .and(body_json(json!({"oldPassword": "hunter2", "newPassword": "correct horse"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!("Password changed"))))
        .expect(1)
        .mount(&h.server)
        .await;

    let update = UserUpdateDto { display_name: Some("Ada L.".to_string()), ..Default::default() };
    h.ctx.users.update_self(&update).await.expect("update profile");
    h.ctx.users.change_password("hunter2", "correct horse").await.expect("change password");
}

#[tokio::test]
async fn refreshed_tokens_are_used_by_every_service() {
    let h = Harness::start(Some("old"), Some("r1")).await;
    Mock::given(method("POST"))
        .and(path(api_path("Auth/refresh")))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokens("new", "r2")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("Auth/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json())))
        .mount(&h.server)
        .await;

    h.ctx.auth.refresh().await.expect("refresh");
    h.ctx.reload_me().await.expect("profile");

    let me = &h.requests_to("Auth/me").await[0];
    assert_eq!(header(me, "authorization"), Some("Bearer new"));
}
