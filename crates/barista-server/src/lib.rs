//! # barista-server
//!
//! HTTP surface for the Barista drinks menu: a small CRUD API where every
//! privileged route is gated by permissions carried in a JWT bearer token.
//! Storage is SQLite via `sqlx`; token verification lives in `barista-auth`.
//!
//! The crate is a library so integration tests can drive the assembled
//! router directly; the `barista-server` binary wires it to a socket.

pub mod api_types;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use error::ApiError;
pub use state::AppState;
