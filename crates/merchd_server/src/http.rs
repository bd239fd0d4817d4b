//! HTTP surface for the merchd pipeline.
//!
//! Thin transport wiring: each route decodes the body into its typed
//! request, runs the matching [`RequestHandler`] method, and answers with
//! a base64-wrapped envelope. `/` and `/test` are the only exceptions -
//! the root redirects and the health check answers unwrapped JSON.

use crate::error::{ServerError, ServerResult};
use crate::handler::RequestHandler;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use merchd_envelope::{
    decode, encode, encode_plain, LoginRequest, PurchaseRequest, ResponseEnvelope, UpdateRequest,
};
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Builds the HTTP router over a request handler.
pub fn build_router(handler: Arc<RequestHandler>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(health))
        .route("/login", post(login))
        .route("/merchs", post(own_inventory))
        .route("/merchsupdate", post(update_quantity))
        .route("/allmerchs", post(available_inventory))
        .route("/purchase", post(purchase))
        .with_state(handler)
}

/// Runs the decode -> handle -> encode pipeline for one request.
fn dispatch<T, F>(
    handler: &RequestHandler,
    addr: SocketAddr,
    path: &'static str,
    body: &[u8],
    op: F,
) -> Response
where
    T: DeserializeOwned,
    F: FnOnce(&RequestHandler, &T) -> ServerResult<ResponseEnvelope>,
{
    let outcome = decode::<T>(body)
        .map_err(ServerError::from)
        .and_then(|request| op(handler, &request));

    match outcome {
        Ok(envelope) => {
            info!(%addr, path, "request served");
            wrapped(StatusCode::OK, &envelope)
        }
        Err(err) => {
            error!(%addr, path, error = %err, "request failed");
            let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::NOT_FOUND);
            wrapped(status, &ResponseEnvelope::failure(err.status(), err.wire_message()))
        }
    }
}

/// Encodes an envelope into the base64 wire form used by every endpoint
/// except the health check.
fn wrapped(status: StatusCode, envelope: &ResponseEnvelope) -> Response {
    match encode(envelope, false) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "response encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn root(ConnectInfo(addr): ConnectInfo<SocketAddr>) -> Response {
    info!(%addr, "webroot redirect to /test");
    (StatusCode::FOUND, [(header::LOCATION, "/test")]).into_response()
}

async fn health(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Response {
    info!(%addr, "serving test page");
    let name = &handler.context().config.service_name;
    let envelope = ResponseEnvelope::success_text(format!("{name} webserver online"));
    // The one unwrapped response on the surface: plain JSON, no base64.
    match encode_plain(&envelope, false) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "response encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn login(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    dispatch::<LoginRequest, _>(&handler, addr, "/login", &body, RequestHandler::login)
}

async fn own_inventory(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    dispatch::<LoginRequest, _>(
        &handler,
        addr,
        "/merchs",
        &body,
        RequestHandler::own_inventory,
    )
}

async fn update_quantity(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    dispatch::<UpdateRequest, _>(
        &handler,
        addr,
        "/merchsupdate",
        &body,
        RequestHandler::update_quantity,
    )
}

async fn available_inventory(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    dispatch::<LoginRequest, _>(
        &handler,
        addr,
        "/allmerchs",
        &body,
        RequestHandler::available_inventory,
    )
}

async fn purchase(
    State(handler): State<Arc<RequestHandler>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Response {
    dispatch::<PurchaseRequest, _>(&handler, addr, "/purchase", &body, RequestHandler::purchase)
}
