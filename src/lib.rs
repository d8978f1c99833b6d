// src/lib.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppState;

/// Monta o router completo: painel + as oito telas de cadastro.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(handlers::home::routes())
        .merge(handlers::employees::routes())
        .merge(handlers::attendances::routes())
        .merge(handlers::leaves::routes())
        .merge(handlers::payrolls::routes())
        .merge(handlers::performances::routes())
        .merge(handlers::trainings::routes())
        .merge(handlers::compliances::routes())
        .merge(handlers::users::routes())
        .fallback(handlers::home::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
