pub mod admins;
pub mod auth;
pub mod changes;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        // Admins
        .route("/api/v1/admins", get(admins::list).post(admins::create))
        .route(
            "/api/v1/admins/{id}",
            get(admins::get).put(admins::update).delete(admins::delete),
        )
        // Change log
        .route("/api/v1/changes", get(changes::list))
        .route("/api/v1/changes/{id}", get(changes::get))
}
