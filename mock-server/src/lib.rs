//! In-memory users API speaking the `{ "data": ... }` envelope protocol.
//!
//! Successful responses wrap their payload as `{ "data": ..., "message": ... }`;
//! failures return `{ "status", "error", "messages": [...], "path" }`.

pub mod store;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub use store::{Address, Company, Coordinate, Geo, Store, StoreError, User, UserId, UserInput};

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn success(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            message: message.to_string(),
        }
    }

    fn empty(message: &str) -> Self {
        Self {
            data: None,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
    pub path: String,
}

/// Any rejected request, rendered as an `ErrorResponse` for its path.
struct Failure {
    status: StatusCode,
    error: &'static str,
    messages: Vec<String>,
    path: String,
}

impl Failure {
    fn at(uri: &Uri) -> impl FnOnce(StoreError) -> Failure + '_ {
        move |error| Failure {
            status: error.status(),
            error: error.title(),
            messages: error.into_messages(),
            path: uri.path().to_string(),
        }
    }

    /// A body axum could not read as `UserInput`.
    fn unreadable(uri: &Uri) -> impl FnOnce(JsonRejection) -> Failure + '_ {
        move |rejection| Failure {
            status: rejection.status(),
            error: "Malformed Request",
            messages: vec![rejection.body_text()],
            path: uri.path().to_string(),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            error: self.error.to_string(),
            messages: self.messages,
            path: self.path,
        };
        warn!(status = body.status, messages = ?body.messages, "request rejected");
        (self.status, Json(body)).into_response()
    }
}

/// Router over an empty store.
pub fn app() -> Router {
    router(Store::default())
}

/// Router preloaded with the demo users.
pub fn seeded_app() -> Router {
    router(Store::seeded())
}

pub fn router(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_users(State(db): State<Db>) -> Json<ApiResponse<Vec<User>>> {
    info!("fetching all users");
    let users = db.read().await.list();
    Json(ApiResponse::success(users, "Users retrieved successfully"))
}

async fn create_user(
    State(db): State<Db>,
    uri: Uri,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), Failure> {
    let Json(input) = body.map_err(Failure::unreadable(&uri))?;
    info!(username = ?input.username, "creating user");
    let user = db.write().await.create(input).map_err(Failure::at(&uri))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, "User created successfully")),
    ))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<UserId>,
    uri: Uri,
) -> Result<Json<ApiResponse<User>>, Failure> {
    info!(user_id = id, "fetching user");
    let user = db.read().await.get(id).map_err(Failure::at(&uri))?;
    Ok(Json(ApiResponse::success(user, "User retrieved successfully")))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<UserId>,
    uri: Uri,
    body: Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, Failure> {
    let Json(input) = body.map_err(Failure::unreadable(&uri))?;
    info!(user_id = id, "updating user");
    let user = db.write().await.update(id, input).map_err(Failure::at(&uri))?;
    Ok(Json(ApiResponse::success(user, "User updated successfully")))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<UserId>,
    uri: Uri,
) -> Result<Json<ApiResponse<()>>, Failure> {
    info!(user_id = id, "deleting user");
    db.write().await.delete(id).map_err(Failure::at(&uri))?;
    Ok(Json(ApiResponse::empty("User deleted successfully")))
}
