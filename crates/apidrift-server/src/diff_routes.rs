//! Diff HTTP Routes
//!
//! Endpoints for schema diffs, endpoint snapshot comparison and alert
//! dispatch. Handlers are thin: they attach correlation ids, call into
//! `apidrift_core` and map failures through [`ApiError`].

use std::sync::Arc;

use apidrift_core::alert::timestamp_from_unix;
use apidrift_core::errors::{ExError, ExErrorKind};
use apidrift_core::{
    compare_endpoints, diff_values, dispatch_alert, AlertPayload, AlertSink, DiffReport,
    DriftConfig, EndpointChanges, EndpointSchema, LogAlertSink,
};
use apidrift_core_types::{RequestContext, RequestId, TraceId};
use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Header carrying a caller-supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Header carrying an upstream trace id
pub const TRACE_ID_HEADER: &str = "x-trace-id";

// ==================
// Shared State
// ==================

/// State shared across diff handlers
pub struct DriftState {
    pub config: DriftConfig,
    pub sink: Arc<dyn AlertSink>,
}

impl DriftState {
    /// State that logs alerts instead of sending them anywhere
    pub fn new(config: DriftConfig) -> Self {
        Self::with_sink(config, Arc::new(LogAlertSink))
    }

    pub fn with_sink(config: DriftConfig, sink: Arc<dyn AlertSink>) -> Self {
        Self { config, sink }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub old: Value,
    pub new: Value,
}

#[derive(Debug, Deserialize)]
pub struct EndpointsDiffRequest {
    pub old: Vec<EndpointSchema>,
    pub new: Vec<EndpointSchema>,
}

/// Either two schema documents or two endpoint snapshots (JSON arrays)
#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    pub api: String,
    pub old: Value,
    pub new: Value,
    /// Scan time in unix seconds; defaults to now
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub delivered: bool,
    pub payload: Option<AlertPayload>,
}

// ==================
// Diff Routes
// ==================

/// Create diff routes
pub fn diff_routes(state: Arc<DriftState>) -> Router {
    Router::new()
        .route("/diff", post(diff_handler))
        .route("/endpoints/diff", post(endpoints_diff_handler))
        .route("/alerts", post(alert_handler))
        .with_state(state)
}

fn request_context(headers: &HeaderMap) -> RequestContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut ctx = match header(REQUEST_ID_HEADER) {
        Some(id) => RequestContext::with_request_id(RequestId::from_string(id)),
        None => RequestContext::new(),
    };
    if let Some(id) = header(TRACE_ID_HEADER) {
        ctx = ctx.with_trace_id(TraceId::from_string(id));
    }
    ctx
}

fn correlate(err: ExError, ctx: &RequestContext) -> ApiError {
    let err = err.with_request_id(ctx.request_id.clone());
    let err = match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    };
    tracing::warn!(
        request_id = %ctx.request_id,
        err.code = err.code(),
        "request rejected: {}",
        err
    );
    ApiError(err)
}

async fn diff_handler(
    State(state): State<Arc<DriftState>>,
    headers: HeaderMap,
    Json(req): Json<DiffRequest>,
) -> Result<Json<DiffReport>, ApiError> {
    let ctx = request_context(&headers);
    tracing::debug!(request_id = %ctx.request_id, "POST /diff");

    let report = diff_values(&req.old, &req.new, &state.config).map_err(|e| correlate(e, &ctx))?;
    Ok(Json(report))
}

async fn endpoints_diff_handler(
    State(state): State<Arc<DriftState>>,
    headers: HeaderMap,
    Json(req): Json<EndpointsDiffRequest>,
) -> Result<Json<EndpointChanges>, ApiError> {
    let ctx = request_context(&headers);
    tracing::debug!(request_id = %ctx.request_id, "POST /endpoints/diff");

    let changes =
        compare_endpoints(&req.old, &req.new, &state.config).map_err(|e| correlate(e, &ctx))?;
    Ok(Json(changes))
}

fn snapshot(value: Value) -> Result<Vec<EndpointSchema>, ExError> {
    serde_json::from_value(value).map_err(|e| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("alert")
            .with_message(format!("invalid endpoint snapshot: {}", e))
    })
}

fn build_payload(req: AlertRequest, config: &DriftConfig) -> Result<Option<AlertPayload>, ExError> {
    let timestamp = match req.timestamp {
        Some(secs) => timestamp_from_unix(secs)?,
        None => Utc::now(),
    };

    if req.old.is_array() && req.new.is_array() {
        let changes = compare_endpoints(&snapshot(req.old)?, &snapshot(req.new)?, config)?;
        Ok(AlertPayload::from_endpoint_changes(
            &req.api,
            &changes,
            timestamp,
            &config.environment,
        ))
    } else {
        let report = diff_values(&req.old, &req.new, config)?;
        Ok(AlertPayload::from_report(
            &req.api,
            &report,
            timestamp,
            &config.environment,
        ))
    }
}

async fn alert_handler(
    State(state): State<Arc<DriftState>>,
    headers: HeaderMap,
    Json(req): Json<AlertRequest>,
) -> Result<Json<AlertResponse>, ApiError> {
    let ctx = request_context(&headers);
    tracing::debug!(request_id = %ctx.request_id, api = %req.api, "POST /alerts");

    let payload = build_payload(req, &state.config).map_err(|e| correlate(e, &ctx))?;
    let delivered =
        dispatch_alert(state.sink.as_ref(), payload.as_ref()).map_err(|e| correlate(e, &ctx))?;

    Ok(Json(AlertResponse { delivered, payload }))
}
