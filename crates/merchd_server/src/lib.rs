//! # merchd Server
//!
//! Request pipeline and HTTP surface for the merchd backend.
//!
//! Every mutating endpoint follows the same pipeline:
//!
//! ```text
//! Received -> BodyDecoded -> Authenticated -> Authorized
//!          -> OperationExecuted -> ResponseSent
//! ```
//!
//! A failure at any transition short-circuits straight to `ResponseSent`
//! with an error envelope; no request ever ends without a response, and
//! every failure is logged with the peer address and path first.
//!
//! # Architecture
//!
//! - [`ServerConfig`] - explicit configuration handed to the pipeline at
//!   startup; no ambient globals
//! - [`auth`] - SHA-256 credential digest, store-backed verification and
//!   the pure role check
//! - [`RequestHandler`] - one method per endpoint, transport-agnostic
//! - [`build_router`] - the axum surface wiring bodies, statuses and
//!   peer-address logging around the handler
//!
//! # Authentication
//!
//! There are no sessions or tokens: credentials ride along on every call
//! and are re-validated against the store each time. Passwords are
//! digested before verification and never logged or persisted raw.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
mod config;
mod error;
mod handler;
mod http;

pub use config::ServerConfig;
pub use error::{Operation, ServerError, ServerResult};
pub use handler::{HandlerContext, RequestHandler};
pub use http::build_router;
