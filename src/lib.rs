pub mod auth;
pub mod changes;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::changes::{AuditPolicy, ChangeObserver, PgChangeLog};
use crate::config::Config;
use crate::state::{AppState, SharedState};

/// Build the app with the change-log policy taken from `config`.
pub fn build_app(pool: PgPool, config: Config) -> Router {
    let policy = AuditPolicy::from_setting(config.log_changes);
    build_app_with_policy(pool, config, policy)
}

/// Build the app with an explicit change-log policy, e.g. a predicate.
pub fn build_app_with_policy(pool: PgPool, config: Config, policy: AuditPolicy) -> Router {
    tracing::info!(?policy, "Change logging policy");

    let changes = ChangeObserver::new(policy, Arc::new(PgChangeLog::new(pool.clone())))
        .with_auth_routes(config.auth_routes.clone());

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        changes,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
