use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, seeded_app, ApiResponse, ErrorResponse, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_value(response: axum::response::Response) -> serde_json::Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(empty_request("GET", "/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<Vec<User>> = body_json(resp).await;
    assert_eq!(body.data.unwrap().len(), 0);
}

#[tokio::test]
async fn list_users_seeded_in_id_order() {
    let resp = seeded_app().oneshot(empty_request("GET", "/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<Vec<User>> = body_json(resp).await;
    let ids: Vec<_> = body.data.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// --- create ---

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","username":"ada","email":"ada@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: ApiResponse<User> = body_json(resp).await;
    let user = body.data.unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "ada");
    assert_eq!(body.message, "User created successfully");
}

#[tokio::test]
async fn create_user_invalid_returns_422_with_messages() {
    let resp = app()
        .oneshot(json_request("POST", "/users", r#"{"username":"ada","email":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.status, 422);
    assert_eq!(body.messages, vec!["name is required", "email is invalid"]);
    assert_eq!(body.path, "/users");
}

#[tokio::test]
async fn create_user_duplicate_email_returns_409() {
    let resp = seeded_app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Copy","username":"copy","email":"Sincere@april.biz"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.messages, vec!["Email already exists: Sincere@april.biz"]);
}

#[tokio::test]
async fn create_user_echoes_numeric_geo() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","username":"ada","email":"ada@example.com",
                "address":{"city":"London","geo":{"lat":1.5,"lng":"-2.25"}}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_value(resp).await;
    assert_eq!(body["data"]["address"]["geo"]["lat"], 1.5);
    assert_eq!(body["data"]["address"]["geo"]["lng"], "-2.25");
}

#[tokio::test]
async fn create_user_unparsable_body_returns_error_envelope() {
    let resp = app()
        .oneshot(json_request("POST", "/users", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Malformed Request");
    assert_eq!(body.messages.len(), 1);
    assert_eq!(body.path, "/users");
}

// --- get ---

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(empty_request("GET", "/users/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.messages, vec!["User not found with id: 7"]);
    assert_eq!(body.path, "/users/7");
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/users/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_seeded_user_has_nested_objects() {
    let resp = seeded_app().oneshot(empty_request("GET", "/users/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_value(resp).await;
    assert_eq!(body["data"]["name"], "Leanne Graham");
    assert_eq!(body["data"]["address"]["geo"]["lng"], "81.1496");
    assert_eq!(body["data"]["company"]["catchPhrase"], "Multi-layered client-server neural-net");
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/7", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_blank_name_returns_422() {
    let resp = seeded_app()
        .oneshot(json_request("PUT", "/users/1", r#"{"name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.messages, vec!["name is required"]);
}

#[tokio::test]
async fn update_user_wrong_field_type_returns_error_envelope() {
    let resp = seeded_app()
        .oneshot(json_request("PUT", "/users/1", r#"{"name":7}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = body_json(resp).await;
    assert_eq!(body.status, 422);
    assert_eq!(body.path, "/users/1");
    assert!(body.messages[0].contains("name"));
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/users/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","username":"ada","email":"ada@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ApiResponse<User> = body_json(resp).await;
    let id = created.data.unwrap().id;

    // update: only the phone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/users/{id}"), r#"{"phone":"555-0100"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: ApiResponse<User> = body_json(resp).await;
    let updated = updated.data.unwrap();
    assert_eq!(updated.name, "Ada"); // unchanged
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_value(resp).await;
    assert!(body["data"].is_null());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/users"))
        .await
        .unwrap();
    let body: ApiResponse<Vec<User>> = body_json(resp).await;
    assert!(body.data.unwrap().is_empty());
}
