//! Axum route handlers for the widget API.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use stack_core::{Filter, NewWidget, WidgetId, WidgetUpdate};
use stack_store::OrderedStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::GatewayError,
    extract::{JsonBody, QueryParams},
    rate::RateLimiter,
};

/// Page size used when a request omits `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Header selecting durable reads when set to `true`.
pub const PREFER_DURABLE_HEADER: &str = "db";

// ── Shared state ─────────────────────────────────────────────────────────────

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    pub store: OrderedStore,
    pub limiter: RateLimiter,
}

impl AppState {
    /// Bundle a store and a limiter.
    #[must_use]
    pub fn new(store: OrderedStore, limiter: RateLimiter) -> Self {
        Self { store, limiter }
    }
}

type Shared = Arc<AppState>;

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub x_start: i32,
    pub y_start: i32,
    pub x_stop: i32,
    pub y_stop: i32,
}

impl FilterQuery {
    fn filter(&self) -> Filter {
        Filter::new(self.x_start, self.y_start, self.x_stop, self.y_stop)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: String,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over `state`.
///
/// Every widget route passes the rate limiter, keyed by its route template
/// (e.g. `/widget/{id}`); `/health` is not limited.
pub fn create_router(state: Shared) -> Router {
    Router::new()
        .route("/widget", post(create_widget).delete(delete_widget))
        .route("/widget/many", get(get_many))
        .route("/widget/filter", get(get_filtered))
        .route("/widget/{id}", get(get_widget).put(update_widget))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), rate_limit))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn rate_limit(
    State(state): State<Shared>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_owned(), |path| path.as_str().to_owned());
    state.limiter.admit(&route)?;
    Ok(next.run(request).await)
}

fn ensure_positive_size(width: Option<u32>, height: Option<u32>) -> Result<(), GatewayError> {
    for (field, value) in [("width", width), ("height", height)] {
        if value == Some(0) {
            return Err(GatewayError::InvalidRequest(format!("{field} must be positive")));
        }
    }
    Ok(())
}

fn prefers_durable(headers: &HeaderMap) -> bool {
    headers
        .get(PREFER_DURABLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /widget`: create a widget and return the stored copy.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body does not decode or
/// gives a zero width or height.
pub async fn create_widget(
    State(state): State<Shared>,
    JsonBody(body): JsonBody<NewWidget>,
) -> Result<impl IntoResponse, GatewayError> {
    ensure_positive_size(Some(body.width), Some(body.height))?;
    let widget = state.store.create(body);
    Ok((StatusCode::CREATED, Json(widget)))
}

/// `PUT /widget/{id}`: replace a widget.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `NullAttribute` or `NotFound`, or
/// [`GatewayError::InvalidRequest`] for an undecodable body or a zero size.
pub async fn update_widget(
    State(state): State<Shared>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<WidgetUpdate>,
) -> Result<impl IntoResponse, GatewayError> {
    ensure_positive_size(body.width, body.height)?;
    let widget = state.store.update(body, &WidgetId::from(id))?;
    Ok(Json(widget))
}

/// `GET /widget/{id}`: fetch one widget.
///
/// # Errors
/// Returns [`GatewayError::WidgetNotFound`] if neither memory nor the durable
/// backend knows the id.
pub async fn get_widget(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let id = WidgetId::from(id);
    state
        .store
        .get_by_id(&id, prefers_durable(&headers))
        .map(Json)
        .ok_or(GatewayError::WidgetNotFound(id))
}

/// `GET /widget/many`: page through widgets in stacking order.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `TooManyRequested` if `limit`
/// exceeds the store's page cap, or [`GatewayError::InvalidRequest`] if the
/// query string does not decode.
pub async fn get_many(
    State(state): State<Shared>,
    QueryParams(query): QueryParams<PageQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let page = state.store.get_many(query.offset, query.limit, prefers_durable(&headers))?;
    Ok(Json(page))
}

/// `GET /widget/filter`: page through widgets passing a bounding rectangle.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `TooManyRequested` if `limit`
/// exceeds the store's page cap.
pub async fn get_filtered(
    State(state): State<Shared>,
    QueryParams(query): QueryParams<FilterQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let page = state.store.get_filtered(
        query.offset,
        query.limit,
        prefers_durable(&headers),
        &query.filter(),
    )?;
    Ok(Json(page))
}

/// `DELETE /widget?id=`: remove a widget.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `NotFound` if the id is unknown.
pub async fn delete_widget(
    State(state): State<Shared>,
    QueryParams(query): QueryParams<DeleteQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    state.store.delete(&WidgetId::from(query.id))?;
    Ok(StatusCode::NO_CONTENT)
}
