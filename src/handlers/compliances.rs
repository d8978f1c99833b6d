// src/handlers/compliances.rs

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
    models::compliance::{Compliance, ComplianceForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Compliances",
    id_not_provided: "Compliance ID not provided.",
    not_found: "Compliance record not found.",
    id_mismatch: "Compliance ID mismatch.",
    load_list_error: "Error loading compliance records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading compliance details.",
    load_edit_error: "Error loading compliance for editing.",
    load_delete_error: "Error loading compliance for deletion.",
    create_error: "Error creating compliance record. Please try again.",
    update_error: "Error updating compliance record. Please try again.",
    delete_error: "Error deleting compliance record. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Compliances", get(index))
        .route("/Compliances/Index", get(index))
        .route("/Compliances/Details", get(missing_id))
        .route("/Compliances/Details/{id}", get(details))
        .route("/Compliances/Create", get(create_form).post(create))
        .route("/Compliances/Edit", get(missing_id))
        .route("/Compliances/Edit/{id}", get(edit_form).post(edit))
        .route("/Compliances/Delete", get(missing_id))
        .route("/Compliances/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Compliances
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.compliance_service.list().await {
        Ok(records) => render(jar, Page::new("Compliances/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar conformidades: {}", e);
            let page = Page::new("Compliances/Index", Vec::<WithEmployee<Compliance>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Compliances/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.compliance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Compliances/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Compliances/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.compliance_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Compliances/Create", ComplianceForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Compliances/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<ComplianceForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.compliance_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Compliance record created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.compliance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Compliances/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Compliances/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.compliance_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Compliances/Edit", ComplianceForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Compliances/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<ComplianceForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de conformidade: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.compliance_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Compliance record updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.compliance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Compliances/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Compliances/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.compliance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Compliances/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Compliances/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.compliance_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Compliance record deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
