use std::sync::Arc;

use actix_web::cookie::{Cookie, time::Duration};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use inkwell_infra::{JwtConfig, JwtTokenService};

use crate::session::SESSION_COOKIE;
use crate::state::{AppState, Ports};

fn test_state() -> web::Data<AppState> {
    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        ..JwtConfig::default()
    }));
    web::Data::new(AppState::from_ports(Ports::in_memory(tokens), false))
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(test_state())
                .configure(crate::configure_app),
        )
        .await
    };
}

/// Register an account and return `(token, user id)`.
macro_rules! register {
    ($app:expr, $name:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "name": $name, "email": $email, "password": "password1" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }};
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_interaction_scenario() {
    let app = init_app!();

    // Register sets the session cookie and leaves lastLogin empty.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "name": "A", "email": "a@x.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap();
    assert!(!cookie.value().is_empty());
    // Cookie lifetime follows the token lifetime (seven days by default).
    assert_eq!(cookie.max_age(), Some(Duration::seconds(7 * 24 * 3600)));
    let body: Value = test::read_body_json(resp).await;
    assert!(body["user"]["lastLogin"].is_null());
    assert!(body["user"].get("passwordHash").is_none());

    // Login stamps lastLogin.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(!body["user"]["lastLogin"].is_null());
    let author_token = body["token"].as_str().unwrap().to_string();

    // Create through the cookie; content is sanitized.
    let req = test::TestRequest::post()
        .uri("/api/v1/blogs")
        .cookie(Cookie::new(SESSION_COOKIE, author_token.clone()))
        .set_json(json!({ "title": "T", "content": "<p>hi</p><script>alert(1)</script>" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let blog: Value = test::read_body_json(resp).await;
    assert_eq!(blog["content"], "<p>hi</p>");
    assert_eq!(blog["author"]["name"], "A");
    let blog_id = blog["id"].as_str().unwrap().to_string();

    // A second identity likes, then dislikes, through the Bearer header.
    let (reader_token, _) = register!(app, "B", "b@x.com");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{blog_id}/like"))
        .insert_header(bearer(&reader_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likes"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{blog_id}/dislike"))
        .insert_header(bearer(&reader_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["dislikes"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likesCount"], 0);
    assert_eq!(body["dislikesCount"], 1);

    // Only the author may delete.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .insert_header(bearer(&reader_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .insert_header(bearer(&author_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_protected_route_requires_token() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not authorized, no token");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[actix_web::test]
async fn test_duplicate_registration_and_bad_login() {
    let app = init_app!();
    register!(app, "Ada", "ada@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "name": "Ada", "email": "ADA@example.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_reports_invalid_fields() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "not-an-email", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let fields = body["error"].as_str().unwrap();
    assert!(fields.contains("name"));
    assert!(fields.contains("email"));
    assert!(fields.contains("password"));
}

#[actix_web::test]
async fn test_malformed_json_uses_error_body() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn test_profile_completion() {
    let app = init_app!();
    let (token, id) = register!(app, "Ada", "ada@example.com");
    register!(app, "Grace", "grace@example.com");

    let req = test::TestRequest::put()
        .uri("/api/v1/users/completeprofile")
        .insert_header(bearer(&token))
        .set_json(json!({
            "bio": "Analytical engines",
            "socials": { "linkedin": "https://www.linkedin.com/in/ada" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["bio"], "Analytical engines");
    assert_eq!(body["socials"]["linkedin"], "https://www.linkedin.com/in/ada");

    // Taking another account's email is rejected.
    let req = test::TestRequest::put()
        .uri("/api/v1/users/completeprofile")
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "grace@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_comments_search_and_my_blogs() {
    let app = init_app!();
    let (token, ada_id) = register!(app, "Ada", "ada@example.com");

    for (title, content) in [
        ("Rust ownership", "<p>borrowing rules</p>"),
        ("Gardening", "<p>tomatoes</p>"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/blogs")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": title, "content": content }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/blogs?search=rust")
        .to_request();
    let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.len(), 1);
    let blog_id = found[0]["id"].as_str().unwrap().to_string();

    // Markup is not searchable text.
    let req = test::TestRequest::get()
        .uri("/api/v1/blogs?search=p")
        .to_request();
    let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(found.is_empty());

    let req = test::TestRequest::get()
        .uri("/api/v1/blogs/my/blogs")
        .insert_header(bearer(&token))
        .to_request();
    let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.len(), 2);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/blogs/{blog_id}/comment"))
        .insert_header(bearer(&token))
        .set_json(json!({ "text": "first!" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["text"], "first!");
    assert_eq!(body["comments"][0]["user"]["id"], ada_id.as_str());
    assert_eq!(body["comments"][0]["user"]["name"], "Ada");

    let req = test::TestRequest::get().uri("/api/v1/blogs").to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let commented = all.iter().find(|b| b["id"] == blog_id.as_str()).unwrap();
    assert_eq!(commented["commentsCount"], 1);
    assert_eq!(commented["comments"][0]["user"]["name"], "Ada");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/blogs/{}/comment", uuid::Uuid::new_v4()))
        .insert_header(bearer(&token))
        .set_json(json!({ "text": "lost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_blog_is_partial() {
    let app = init_app!();
    let (token, _) = register!(app, "Ada", "ada@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Draft", "content": "<p>body</p>" }))
        .to_request();
    let blog: Value = test::call_and_read_body_json(&app, req).await;
    let blog_id = blog["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Final" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], "Final");
    assert_eq!(body["content"], "<p>body</p>");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/blogs/{blog_id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
