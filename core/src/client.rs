//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UsersClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `UsersApi` glues the two halves to a `Transport`; tests can drive them
//! directly with hand-written responses.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::envelope::{Envelope, ErrorEnvelope};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewUser, User, UserId, UserPatch};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct UsersClient {
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn item(&self, id: UserId) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The id is passed through as-is; the server decides whether it exists.
    pub fn build_get_user(&self, id: UserId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_user(&self, id: UserId, patch: &UserPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item(id),
            headers: json_headers(),
            body: Some(to_json(patch)?),
        })
    }

    pub fn build_delete_user(&self, id: UserId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A response without `data` is an empty list, not an error.
    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, "Failed to fetch users")?;
        let envelope: Envelope<Vec<User>> = decode(&response.body)?;
        match envelope.data {
            Some(users) => Ok(users),
            None => {
                warn!(status = response.status, "list response has no data, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn parse_get_user(&self, id: UserId, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, &format!("Failed to fetch user with ID {id}"))?;
        require_data(decode(&response.body)?)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_mutation_status(&response, "Failed to create user")?;
        require_data(decode(&response.body)?)
    }

    pub fn parse_update_user(&self, id: UserId, response: HttpResponse) -> Result<User, ApiError> {
        check_mutation_status(&response, &format!("Failed to update user {id}"))?;
        require_data(decode(&response.body)?)
    }

    /// The body of a delete response is never inspected, success or not.
    pub fn parse_delete_user(&self, id: UserId, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &format!("Failed to delete user {id}"))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    envelope.data.ok_or_else(|| {
        warn!("response envelope has no data");
        ApiError::MalformedResponse("response has no data".to_string())
    })
}

/// Map a non-2xx response to `HttpStatus` with a "context: code text" message.
fn check_status(response: &HttpResponse, context: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(status_error(response, fallback_message(response, context)))
}

/// Like `check_status`, but prefer the server's `messages` when the error
/// body carries any.
fn check_mutation_status(response: &HttpResponse, context: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = ErrorEnvelope::parse(&response.body)
        .summary()
        .unwrap_or_else(|| fallback_message(response, context));
    Err(status_error(response, message))
}

fn fallback_message(response: &HttpResponse, context: &str) -> String {
    format!("{context}: {} {}", response.status, response.status_text)
        .trim_end()
        .to_string()
}

fn status_error(response: &HttpResponse, message: String) -> ApiError {
    warn!(status = response.status, %message, "request failed");
    ApiError::HttpStatus {
        code: response.status,
        status_text: response.status_text.clone(),
        message,
    }
}
