//! HTTP API over the cached sync result.
//!
//! Read endpoints never touch the remote system; they serve the last
//! cached result. Only `POST /api/sync` runs a cycle, serialized by a
//! mutex so at most one sync is in flight.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use uni_mirror_app::{AppConfig, CacheStore, SyncService};
use uni_mirror_core::week_view;
use uni_mirror_todoist::TodoistClient;

/// Shared state handed to every handler.
pub struct AppState {
    config: AppConfig,
    service: SyncService<TodoistClient>,
    cache: CacheStore,
    /// Serializes sync cycles; the core does not support concurrent ones.
    sync_gate: Mutex<()>,
}

impl AppState {
    /// Bundle configuration, sync service, and cache into handler state.
    pub fn new(config: AppConfig, service: SyncService<TodoistClient>, cache: CacheStore) -> Self {
        Self {
            config,
            service,
            cache,
            sync_gate: Mutex::new(()),
        }
    }
}

/// Bind the listener and serve the API until the process stops.
pub async fn run(config: AppConfig, service: SyncService<TodoistClient>, cache: CacheStore) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config, service, cache));
    let router = build_router(state);

    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Assemble the route table.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assignments", get(all_assignments))
        .route("/api/assignments/week", get(week_assignments))
        .route("/api/assignments/module/{module_id}", get(module_assignments))
        .route("/api/sync", post(run_sync))
        .route("/api/config", get(show_config))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(json!({
        "status": "ok",
        "service": "uni-mirror",
        "timestamp": timestamp,
    }))
}

async fn all_assignments(State(state): State<Arc<AppState>>) -> Response {
    match state.cache.snapshot() {
        Ok(data) => ok(json!({
            "success": true,
            "assignments": data.assignments,
            "modules": data.modules,
            "last_sync": data.last_sync,
        })),
        Err(err) => internal_error(&err),
    }
}

async fn week_assignments(State(state): State<Arc<AppState>>) -> Response {
    match state.cache.snapshot() {
        Ok(data) => {
            let week = week_view(&data.assignments, OffsetDateTime::now_utc());
            ok(json!({
                "success": true,
                "count": week.len(),
                "assignments": week,
                "last_sync": data.last_sync,
            }))
        }
        Err(err) => internal_error(&err),
    }
}

async fn module_assignments(
    State(state): State<Arc<AppState>>,
    Path(module_id): Path<String>,
) -> Response {
    match state.cache.snapshot() {
        Ok(data) => {
            let assignments: Vec<_> = data
                .assignments
                .into_iter()
                .filter(|a| a.module_id.as_deref() == Some(module_id.as_str()))
                .collect();
            ok(json!({
                "success": true,
                "module_id": module_id,
                "count": assignments.len(),
                "assignments": assignments,
                "last_sync": data.last_sync,
            }))
        }
        Err(err) => internal_error(&err),
    }
}

async fn run_sync(State(state): State<Arc<AppState>>) -> Response {
    if let Err(err) = state.config.require_token() {
        return internal_error(&err);
    }

    // Only one cycle in flight; late callers wait for the running one
    // to finish and then run their own.
    let _gate = state.sync_gate.lock().await;

    match state.service.run_cycle(OffsetDateTime::now_utc()).await {
        Ok(result) => {
            let assignments_count = result.assignments.len();
            let modules_count = result.modules.len();
            let last_sync = result.last_sync.clone();
            if let Err(err) = state.cache.replace(result) {
                error!(%err, "Sync succeeded but persisting failed");
                return internal_error(&err);
            }
            ok(json!({
                "success": true,
                "assignments_count": assignments_count,
                "modules_count": modules_count,
                "last_sync": last_sync,
            }))
        }
        Err(err) => {
            // The previous cached result stays authoritative.
            error!(%err, "Sync failed");
            internal_error(&err)
        }
    }
}

async fn show_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "config": {
            "project_name": state.service.project_name(),
            "assignment_label": state.service.assignment_label(),
            "token_configured": state.config.token_configured(),
        }
    }))
}

type Response = (StatusCode, Json<Value>);

fn ok(body: Value) -> Response {
    (StatusCode::OK, Json(body))
}

fn internal_error(err: &dyn std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": err.to_string() })),
    )
}
