use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, Session, User, DEMO_API_KEY, DEMO_MOBILE, DEMO_PARTNER_ID, DEMO_PASSWORD};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn authorized(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn demo_login() -> Request<String> {
    json_request(
        "POST",
        "/auth/session",
        &format!(r#"{{"mobile":"{DEMO_MOBILE}","password":"{DEMO_PASSWORD}"}}"#),
    )
}

// --- sessions ---

#[tokio::test]
async fn login_with_demo_account() {
    let resp = app().oneshot(demo_login()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let session: Session = body_json(resp).await;
    assert!(!session.token.is_empty());
    assert_eq!(session.user.mobile, DEMO_MOBILE);
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/session",
            &format!(r#"{{"mobile":"{DEMO_MOBILE}","password":"nope"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.message, "invalid credentials");
}

#[tokio::test]
async fn login_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/auth/session", r#"{"mobile":"017"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn profile_without_token_returns_401() {
    let resp = app().oneshot(get("/auth/profile")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_unknown_token_returns_401() {
    let resp = app()
        .oneshot(authorized("DELETE", "/auth/session", "not-a-session"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- registration ---

#[tokio::test]
async fn register_returns_201_with_token() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            r#"{"name":"Rahim","mobile":"01800000000","password":"pw","email":"r@example.test"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: Session = body_json(resp).await;
    assert!(!session.token.is_empty());
    assert_eq!(session.user.name, "Rahim");
    assert_eq!(session.user.email.as_deref(), Some("r@example.test"));
}

#[tokio::test]
async fn register_existing_mobile_returns_409() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            &format!(r#"{{"name":"Dup","mobile":"{DEMO_MOBILE}","password":"pw"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_blank_mobile_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            r#"{"name":"Blank","mobile":"  ","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- catalogue ---

#[tokio::test]
async fn products_search_and_paging() {
    let resp = app()
        .oneshot(get("/products?search_key=NAPA&per_page=1&page=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Napa Extra");
}

#[tokio::test]
async fn unpriced_product_omits_price() {
    let resp = app().oneshot(get("/products?search_key=vitamin")).await.unwrap();
    let products: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert!(products[0].get("price").is_none());
}

#[tokio::test]
async fn lookup_lists_are_non_empty() {
    for uri in ["/lookup/countries", "/lookup/specialties", "/products/lifestyle-categories", "/doctors"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let items: Vec<serde_json::Value> = body_json(resp).await;
        assert!(!items.is_empty(), "{uri}");
    }
}

// --- partner ---

#[tokio::test]
async fn partner_me_requires_both_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/partners/me")
                .header("X-Partner-ID", DEMO_PARTNER_ID)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/partners/me")
                .header("X-Partner-ID", DEMO_PARTNER_ID)
                .header("X-API-Key", DEMO_API_KEY)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let partner: serde_json::Value = body_json(resp).await;
    assert_eq!(partner["partner_id"], DEMO_PARTNER_ID);
}

// --- full session lifecycle ---

#[tokio::test]
async fn session_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // login
    let resp = ServiceExt::ready(&mut app).await.unwrap().call(demo_login()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Session = body_json(resp).await;
    let token = session.token;

    // profile with the new token
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/auth/profile", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.mobile, DEMO_MOBILE);

    // logout
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("DELETE", "/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // profile after logout: 401
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("GET", "/auth/profile", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // second logout with the same token: 401
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authorized("DELETE", "/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
