// src/handlers/performances.rs

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{
        db_utils::WithEmployee,
        error::AppError,
        form::Bound,
        view::{redirect_with_flash, Flash, Page},
    },
    config::AppState,
    handlers::{
        choices_or_empty, redirect_missing_id, redirect_on_failure, render, render_write_failure,
        today, Messages,
    },
    models::performance::{Performance, PerformanceForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Performances",
    id_not_provided: "Performance ID not provided.",
    not_found: "Performance record not found.",
    id_mismatch: "Performance ID mismatch.",
    load_list_error: "Error loading performance records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading performance details.",
    load_edit_error: "Error loading performance for editing.",
    load_delete_error: "Error loading performance for deletion.",
    create_error: "Error creating performance record. Please try again.",
    update_error: "Error updating performance record. Please try again.",
    delete_error: "Error deleting performance record. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Performances", get(index))
        .route("/Performances/Index", get(index))
        .route("/Performances/Details", get(missing_id))
        .route("/Performances/Details/{id}", get(details))
        .route("/Performances/Create", get(create_form).post(create))
        .route("/Performances/Edit", get(missing_id))
        .route("/Performances/Edit/{id}", get(edit_form).post(edit))
        .route("/Performances/Delete", get(missing_id))
        .route("/Performances/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Performances
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.performance_service.list().await {
        Ok(records) => render(jar, Page::new("Performances/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar avaliações: {}", e);
            let page = Page::new("Performances/Index", Vec::<WithEmployee<Performance>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Performances/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.performance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Performances/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Performances/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.performance_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Performances/Create", PerformanceForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Performances/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<PerformanceForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.performance_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Performance record created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.performance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Performances/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Performances/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.performance_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Performances/Edit", PerformanceForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Performances/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<PerformanceForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de avaliação: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.performance_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Performance record updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.performance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Performances/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Performances/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.performance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Performances/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Performances/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.performance_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Performance record deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
