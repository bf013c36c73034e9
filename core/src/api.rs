//! The five user operations, each one build → send → parse round trip.
//!
//! `UsersApi` owns no mutable state and no cache: two calls for the same id
//! hit the server twice and may return distinct (equal) values. It is safe
//! to clone and share across threads whenever the transport is.
//!
//! Diagnostics are emitted as `tracing` spans and events; whichever
//! subscriber the caller installs decides where they go.

use tracing::{debug, instrument};

use crate::client::UsersClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewUser, User, UserId, UserPatch};

#[derive(Debug, Clone)]
pub struct UsersApi<T = UreqTransport> {
    client: UsersClient,
    transport: T,
}

impl UsersApi<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> UsersApi<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: UsersClient::new(base_url),
            transport,
        }
    }

    #[instrument(skip(self), err)]
    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.round_trip(self.client.build_list_users())?;
        let users = self.client.parse_list_users(response)?;
        debug!(count = users.len(), "received users");
        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = id), err)]
    pub fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let response = self.round_trip(self.client.build_get_user(id))?;
        self.client.parse_get_user(id, response)
    }

    #[instrument(skip(self, input), fields(username = %input.username), err)]
    pub fn create_user(&self, input: &NewUser) -> Result<User, ApiError> {
        let response = self.round_trip(self.client.build_create_user(input)?)?;
        let user = self.client.parse_create_user(response)?;
        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    #[instrument(skip(self, patch), fields(user_id = id), err)]
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let response = self.round_trip(self.client.build_update_user(id, patch)?)?;
        self.client.parse_update_user(id, response)
    }

    #[instrument(skip(self), fields(user_id = id), err)]
    pub fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_user(id))?;
        self.client.parse_delete_user(id, response)?;
        debug!("user deleted");
        Ok(())
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
