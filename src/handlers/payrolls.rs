// src/handlers/payrolls.rs

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
    models::payroll::{Payroll, PayrollForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Payrolls",
    id_not_provided: "Payroll ID not provided.",
    not_found: "Payroll record not found.",
    id_mismatch: "Payroll ID mismatch.",
    load_list_error: "Error loading payroll records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading payroll details.",
    load_edit_error: "Error loading payroll for editing.",
    load_delete_error: "Error loading payroll for deletion.",
    create_error: "Error creating payroll record. Please try again.",
    update_error: "Error updating payroll record. Please try again.",
    delete_error: "Error deleting payroll record. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Payrolls", get(index))
        .route("/Payrolls/Index", get(index))
        .route("/Payrolls/Details", get(missing_id))
        .route("/Payrolls/Details/{id}", get(details))
        .route("/Payrolls/Create", get(create_form).post(create))
        .route("/Payrolls/Edit", get(missing_id))
        .route("/Payrolls/Edit/{id}", get(edit_form).post(edit))
        .route("/Payrolls/Delete", get(missing_id))
        .route("/Payrolls/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Payrolls
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.payroll_service.list().await {
        Ok(records) => render(jar, Page::new("Payrolls/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar folhas: {}", e);
            let page = Page::new("Payrolls/Index", Vec::<WithEmployee<Payroll>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Payrolls/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.payroll_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Payrolls/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Payrolls/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.payroll_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Payrolls/Create", PayrollForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Payrolls/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<PayrollForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.payroll_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Payroll record created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.payroll_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Payrolls/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Payrolls/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.payroll_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Payrolls/Edit", PayrollForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Payrolls/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<PayrollForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de folha: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.payroll_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Payroll record updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.payroll_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Payrolls/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Payrolls/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.payroll_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Payrolls/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Payrolls/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.payroll_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Payroll record deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
