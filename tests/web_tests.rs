use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use danasite::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;

    // Cheap hashing params keep the test suite fast.
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    config
}

async fn spawn_app() -> Router {
    let state = danasite::web::create_app_state(test_config(), None)
        .await
        .expect("Failed to create app state");
    danasite::web::router(state).await.expect("Failed to build router")
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn register(app: &Router, email: &str, password: &str) -> String {
    let body = format!(
        "username={}&password={}&confirm_password={}",
        email, password, password
    );
    let response = app
        .clone()
        .oneshot(form_request("/register", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    session_cookie(&response)
}

#[tokio::test]
async fn test_home_page_renders() {
    let app = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Dana Digital"));
    assert!(body.contains("contact-form"));
}

#[tokio::test]
async fn test_register_creates_session() {
    let app = spawn_app().await;

    let cookie = register(&app, "new@example.com", "longenough1").await;
    assert!(cookie.starts_with("id="));

    // The nav now greets the logged-in user.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("new@example.com"));
    assert!(body.contains("Log out"));
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/register",
            "username=pat@example.com&password=longenough1&confirm_password=different1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Passwords do not match"));

    // The failed attempt left no account behind, so the email is still free.
    register(&app, "pat@example.com", "longenough1").await;
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = spawn_app().await;

    register(&app, "dup@example.com", "longenough1").await;

    let response = app
        .oneshot(form_request(
            "/register",
            "username=dup@example.com&password=longenough1&confirm_password=longenough1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("already exists"));
}

#[tokio::test]
async fn test_login_errors_do_not_reveal_which_field_was_wrong() {
    let app = spawn_app().await;

    register(&app, "real@example.com", "longenough1").await;

    // Unknown account.
    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=ghost@example.com&password=whatever123",
        ))
        .await
        .unwrap();
    let unknown_account = body_string(response).await;

    // Known account, wrong password.
    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=real@example.com&password=wrongpassword",
        ))
        .await
        .unwrap();
    let wrong_password = body_string(response).await;

    assert_eq!(unknown_account, wrong_password);
    assert!(unknown_account.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = spawn_app().await;

    let cookie = register(&app, "bye@example.com", "longenough1").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The old cookie no longer maps to a session.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(!body.contains("bye@example.com"));
    assert!(body.contains("Log in"));
}

#[tokio::test]
async fn test_reviews_page_always_shows_starter_reviews() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Jayna Forgie"));
    assert!(body.contains("Sam Reynolds"));
    assert!(body.contains("Alex Kim"));
}

#[tokio::test]
async fn test_reviews_fall_back_to_starter_set_when_storage_fails() {
    use sea_orm::{ConnectionTrait, Statement};

    let state = danasite::web::create_app_state(test_config(), None)
        .await
        .expect("Failed to create app state");

    // Knock the table out from under the service.
    let backend = state.store.conn.get_database_backend();
    state
        .store
        .conn
        .execute(Statement::from_string(
            backend,
            "DROP TABLE reviews".to_string(),
        ))
        .await
        .unwrap();

    let app = danasite::web::router(state)
        .await
        .expect("Failed to build router");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Jayna Forgie"));
    assert!(body.contains("Sam Reynolds"));
    assert!(body.contains("Alex Kim"));
    assert!(body.contains("could not be loaded"));
}

#[tokio::test]
async fn test_anonymous_review_post_is_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/reviews",
            "name=Drive-by&text=Great!&rating=5",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The rejected review never reached the board.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("Drive-by"));
}

#[tokio::test]
async fn test_logged_in_user_can_post_review() {
    let app = spawn_app().await;

    let cookie = register(&app, "reviewer@example.com", "longenough1").await;

    let mut request = form_request("/reviews", "name=Casey&text=Wonderful+work&rating=4");
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/reviews"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reviews")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Casey"));
    assert!(body.contains("Wonderful work"));
}

#[tokio::test]
async fn test_gated_pages_redirect_anonymous_visitors_to_login() {
    let app = spawn_app().await;

    for uri in ["/portfolio", "/services/web-design", "/book-consultation"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri: {uri}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "uri: {uri}"
        );
    }
}

#[tokio::test]
async fn test_unknown_service_slug_is_not_found() {
    let app = spawn_app().await;

    let cookie = register(&app, "browser@example.com", "longenough1").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/services/time-travel")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_persists_and_redirects() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/book-consultation",
            "name=Pat&email=pat@example.com&service=web-design&datetime=2026-09-15T10:00&notes=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?booking=success"
    );
}

#[tokio::test]
async fn test_booking_rejects_unknown_service() {
    let app = spawn_app().await;

    let response = app
        .oneshot(form_request(
            "/book-consultation",
            "name=Pat&email=pat@example.com&service=alchemy&datetime=2026-09-15T10:00",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Please choose a service"));
}

#[tokio::test]
async fn test_contact_rejects_empty_message_inline() {
    let app = spawn_app().await;

    let response = app
        .oneshot(form_request(
            "/contact",
            "name=Pat&email=pat@example.com&message=",
        ))
        .await
        .unwrap();

    // The home page comes back with the message next to the form.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("Message is required"));
    assert!(body.contains("contact-form"));
}

#[tokio::test]
async fn test_contact_success_redirects_home_with_flag() {
    let app = spawn_app().await;

    // Mail is disabled in test config, so delivery goes to the log sink.
    let response = app
        .oneshot(form_request(
            "/contact",
            "name=Pat&email=pat@example.com&message=Hello+there",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?contact=success"
    );
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("\"status\":\"ok\""));
}
