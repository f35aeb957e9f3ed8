//! Management API tests
//!
//! CRUD semantics: creation with generated and explicit codes, conflict
//! handling, newest-first listing, full-replace updates and idempotent
//! deletion.

use actix_web::http::{header, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use std::sync::Arc;

use linkbox::config::Config;
use linkbox::middleware::LinkDispatch;
use linkbox::services::{AdminService, AuthService, VisitCounter};
use linkbox::storage::memory::MemoryStore;
use linkbox::storage::{link_key, KvStore, LinkRecord};

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        admin_password: "test-password".to_string(),
        random_code_length: 5,
    }
}

fn test_store() -> Arc<dyn KvStore> {
    Arc::new(MemoryStore::new())
}

const SESSION_COOKIE: &str = "auth_token=valid_session";

macro_rules! init_app {
    ($store:expr) => {{
        let visits = Arc::new(VisitCounter::new($store.clone()));
        test::init_service(
            App::new()
                .wrap(LinkDispatch::new($store.clone(), visits))
                .app_data(web::Data::new($store.clone()))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api")
                        .route("/login", web::post().to(AuthService::login))
                        .route("/links", web::get().to(AdminService::get_all_links))
                        .route("/links", web::post().to(AdminService::post_link))
                        .route("/links/{code}", web::put().to(AdminService::update_link))
                        .route(
                            "/links/{code}",
                            web::delete().to(AdminService::delete_link),
                        ),
                ),
        )
        .await
    }};
}

macro_rules! authed {
    ($req:expr) => {
        $req.insert_header((header::COOKIE, SESSION_COOKIE))
    };
}

#[actix_web::test]
async fn create_with_generated_code() {
    let store = test_store();
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::post().uri("/api/links"))
            .set_json(serde_json::json!({ "url": "https://example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    assert_eq!(body["data"]["originalUrl"], "https://example.com");
    assert_eq!(body["data"]["visitCount"], 0);
    assert_eq!(body["data"]["note"], "");

    // 返回的短码必须能直接解析到记录
    let stored = store.get(&link_key(code)).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com");
}

#[actix_web::test]
async fn create_without_url_returns_400() {
    let store = test_store();
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::post().uri("/api/links"))
            .set_json(serde_json::json!({ "note": "no url" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing URL");
}

#[actix_web::test]
async fn create_with_empty_url_returns_400() {
    let store = test_store();
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::post().uri("/api/links"))
            .set_json(serde_json::json!({ "url": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_with_explicit_code_conflict_returns_409() {
    let store = test_store();
    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::post().uri("/api/links"))
            .set_json(serde_json::json!({ "url": "https://first.example", "shortCode": "mine" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "mine");

    let resp = test::call_service(
        &app,
        authed!(TestRequest::post().uri("/api/links"))
            .set_json(serde_json::json!({ "url": "https://second.example", "shortCode": "mine" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Short code already exists");

    // 冲突的创建不得改动已有记录
    let stored = store.get(&link_key("mine")).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://first.example");
}

#[actix_web::test]
async fn generated_codes_never_conflict() {
    let store = test_store();

    // 生成的短码即便碰撞也会换一个继续，创建永远不会以 409 失败
    let app = init_app!(store);
    for _ in 0..10 {
        let resp = test::call_service(
            &app,
            authed!(TestRequest::post().uri("/api/links"))
                .set_json(serde_json::json!({ "url": "https://example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let entries = store.list("url:", 1000).await.unwrap();
    assert_eq!(entries.len(), 10);
}

#[actix_web::test]
async fn list_returns_newest_first() {
    let store = test_store();
    let app = init_app!(store);

    // 用整体替换把 createdAt 设成可控值
    for (code, created_at) in [("aaa", 1000_i64), ("bbb", 3000), ("ccc", 2000)] {
        let resp = test::call_service(
            &app,
            authed!(TestRequest::put().uri(&format!("/api/links/{}", code)))
                .set_json(serde_json::json!({
                    "originalUrl": format!("https://{}.example", code),
                    "createdAt": created_at,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        authed!(TestRequest::get().uri("/api/links")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["bbb", "ccc", "aaa"]);

    // 删除一个后其余顺序不变
    let resp = test::call_service(
        &app,
        authed!(TestRequest::delete().uri("/api/links/ccc")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::get().uri("/api/links")).to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["bbb", "aaa"]);
}

#[actix_web::test]
async fn list_entries_carry_full_metadata() {
    let store = test_store();
    let record = LinkRecord {
        original_url: "https://example.com".to_string(),
        note: "weekly report".to_string(),
        created_at: 1234,
        visit_count: 7,
    };
    store.put(&link_key("wkly"), &record).await.unwrap();

    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::get().uri("/api/links")).to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let entry = &body.as_array().unwrap()[0];
    assert_eq!(entry["shortCode"], "wkly");
    assert_eq!(entry["originalUrl"], "https://example.com");
    assert_eq!(entry["note"], "weekly report");
    assert_eq!(entry["createdAt"], 1234);
    assert_eq!(entry["visitCount"], 7);
}

#[actix_web::test]
async fn update_is_full_replace() {
    let store = test_store();
    let record = LinkRecord {
        original_url: "https://old.example".to_string(),
        note: "keep me?".to_string(),
        created_at: 1234,
        visit_count: 42,
    };
    store.put(&link_key("repl"), &record).await.unwrap();

    let app = init_app!(store);

    // 省略 note / visitCount，替换后必须回到默认值而不是保留旧值
    let resp = test::call_service(
        &app,
        authed!(TestRequest::put().uri("/api/links/repl"))
            .set_json(serde_json::json!({ "originalUrl": "https://new.example" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["originalUrl"], "https://new.example");
    assert_eq!(body["data"]["note"], "");
    assert_eq!(body["data"]["visitCount"], 0);

    let stored = store.get(&link_key("repl")).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://new.example");
    assert_eq!(stored.note, "");
    assert_eq!(stored.visit_count, 0);
    assert!(stored.created_at > 1234);
}

#[actix_web::test]
async fn delete_is_idempotent() {
    let store = test_store();
    let record = LinkRecord::new("https://example.com".to_string(), String::new());
    store.put(&link_key("gone1"), &record).await.unwrap();

    let app = init_app!(store);

    let resp = test::call_service(
        &app,
        authed!(TestRequest::delete().uri("/api/links/gone1")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["deleted"], true);

    // 再删一次同样成功
    let resp = test::call_service(
        &app,
        authed!(TestRequest::delete().uri("/api/links/gone1")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["deleted"], true);

    assert!(store.get(&link_key("gone1")).await.unwrap().is_none());
}
