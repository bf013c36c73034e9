//! Synchronous API client core for the users service.
//!
//! # Overview
//! Lists, fetches, creates, updates and deletes user records against a
//! remote HTTP endpoint that wraps every payload in a `{ "data": ... }`
//! envelope. Failures are classified into `ApiError` variants that carry a
//! user-facing message.
//!
//! # Design
//! - `UsersClient` is stateless: it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `UsersApi` runs one build → `Transport::send` → parse round trip per
//!   call; `UreqTransport` is the default transport.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::UsersApi;
pub use client::UsersClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Address, Company, Coordinate, Geo, NewUser, User, UserId, UserPatch};
