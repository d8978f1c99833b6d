// src/handlers/home.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::{
    common::view::{Flash, Page},
    config::AppState,
    handlers::render,
    models::dashboard::DashboardSummary,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/Home", get(index))
        .route("/Home/Index", get(index))
        .route("/Home/Privacy", get(privacy))
}

// GET /: os cards do painel
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.dashboard_service.get_summary().await {
        Ok(summary) => render(jar, Page::new("Home/Index", summary)),
        Err(e) => {
            tracing::error!("🔥 Falha ao carregar o painel: {}", e);
            let page = Page::new("Home/Index", DashboardSummary::default())
                .with_flash(Some(Flash::error("Error loading dashboard. Please try again.")));
            render(jar, page)
        }
    }
}

pub async fn privacy(jar: CookieJar) -> Response {
    render(jar, Page::new("Home/Privacy", ()))
}

#[derive(Serialize)]
pub struct ErrorModel {
    pub status: u16,
    pub message: &'static str,
}

// Rota desconhecida
pub async fn not_found() -> Response {
    let model = ErrorModel { status: StatusCode::NOT_FOUND.as_u16(), message: "Page not found." };
    (StatusCode::NOT_FOUND, Page::new("Home/Error", model)).into_response()
}
