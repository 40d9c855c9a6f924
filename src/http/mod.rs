//! HTTP transport - maps the coffee service onto REST routes.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /coffee/:id` — 200 with `Location` and `ETag`, or 404.
//! - `GET /coffees` — 200 with every coffee; `?name=` filters by exact name.
//! - `POST /coffee` — 201 with `Location` and `ETag: "1"`.
//! - `PUT /coffee/:id` — requires `If-Match`; 200, 400, 404 or 409.
//! - `DELETE /coffee/:id` — 200 or 404, no body.
//! - `GET /health` — `{ "ok": true }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coffee_service::{http, CoffeeService, InMemoryCoffeeStore};
//!
//! let service = Arc::new(CoffeeService::new(InMemoryCoffeeStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:8080").await?;
//! ```

mod if_match;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{ETAG, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::coffee::{Coffee, CoffeeId, CoffeeInput};
use crate::service::{CoffeeService, ServiceError};
use crate::store::CoffeeStore;

pub use if_match::expected_version;

/// Build an axum `Router` serving coffees from the given service.
pub fn router<S: CoffeeStore + 'static>(service: Arc<CoffeeService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/coffees", get(list_handler::<S>))
        .route("/coffee", post(create_handler::<S>))
        .route(
            "/coffee/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
///
/// Runs until the process receives Ctrl-C.
pub async fn serve<S: CoffeeStore + 'static>(
    service: Arc<CoffeeService<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "coffee service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Query parameters for `GET /coffees`.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    name: Option<String>,
}

/// `GET /health` — returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /coffee/:id`
async fn get_handler<S: CoffeeStore + 'static>(
    State(service): State<Arc<CoffeeService<S>>>,
    Path(id): Path<CoffeeId>,
) -> Result<Response, ServiceError> {
    let coffee = service.get(id)?;
    versioned_response(StatusCode::OK, coffee)
}

/// `GET /coffees`
async fn list_handler<S: CoffeeStore + 'static>(
    State(service): State<Arc<CoffeeService<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Response, ServiceError> {
    let coffees = service.list(params.name.as_deref())?;
    Ok(Json(coffees).into_response())
}

/// `POST /coffee`
async fn create_handler<S: CoffeeStore + 'static>(
    State(service): State<Arc<CoffeeService<S>>>,
    Json(input): Json<CoffeeInput>,
) -> Result<Response, ServiceError> {
    let coffee = service.create(&input)?;
    versioned_response(StatusCode::CREATED, coffee)
}

/// `PUT /coffee/:id`
async fn update_handler<S: CoffeeStore + 'static>(
    State(service): State<Arc<CoffeeService<S>>>,
    Path(id): Path<CoffeeId>,
    headers: HeaderMap,
    Json(input): Json<CoffeeInput>,
) -> Result<Response, ServiceError> {
    let if_match = expected_version(&headers)?;
    let coffee = service.update(id, &input, if_match)?;
    versioned_response(StatusCode::OK, coffee)
}

/// `DELETE /coffee/:id`
async fn delete_handler<S: CoffeeStore + 'static>(
    State(service): State<Arc<CoffeeService<S>>>,
    Path(id): Path<CoffeeId>,
) -> Result<StatusCode, ServiceError> {
    service.delete(id)?;
    Ok(StatusCode::OK)
}

/// Body plus the `Location` and `ETag` headers for a single coffee.
fn versioned_response(status: StatusCode, coffee: Coffee) -> Result<Response, ServiceError> {
    let location = HeaderValue::from_str(&coffee.location())
        .map_err(|e| ServiceError::Response(format!("invalid Location: {}", e)))?;
    let etag = HeaderValue::from_str(&coffee.etag())
        .map_err(|e| ServiceError::Response(format!("invalid ETag: {}", e)))?;

    let mut response = (status, Json(coffee)).into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    headers.insert(ETAG, etag);
    Ok(response)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(%status, error = %self, "request failed");
        match self {
            ServiceError::NotFound(_) => status.into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
