// src/handlers/employees.rs

use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    common::{
        error::AppError,
        form::Bound,
        view::{redirect_with_flash, Flash, Page},
    },
    config::AppState,
    handlers::{redirect_missing_id, redirect_on_failure, render, render_write_failure, today, Messages},
    models::employee::{Employee, EmployeeForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Employees",
    id_not_provided: "Employee ID not provided.",
    not_found: "Employee not found.",
    id_mismatch: "Employee ID mismatch.",
    load_list_error: "Error loading employees. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading employee details.",
    load_edit_error: "Error loading employee for editing.",
    load_delete_error: "Error loading employee for deletion.",
    create_error: "Error creating employee. Please try again.",
    update_error: "Error updating employee. Please try again.",
    delete_error: "Error deleting employee. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Employees", get(index))
        .route("/Employees/Index", get(index))
        .route("/Employees/Details", get(missing_id))
        .route("/Employees/Details/{id}", get(details))
        .route("/Employees/Create", get(create_form).post(create))
        .route("/Employees/Edit", get(missing_id))
        .route("/Employees/Edit/{id}", get(edit_form).post(edit))
        .route("/Employees/Delete", get(missing_id))
        .route("/Employees/Delete/{id}", get(delete_confirm).post(delete))
}

pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.employee_service.list().await {
        Ok(employees) => render(jar, Page::new("Employees/Index", employees)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar funcionários: {}", e);
            let page = Page::new("Employees/Index", Vec::<Employee>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.employee_service.get(id).await {
        Ok(employee) => render(jar, Page::new("Employees/Details", employee)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// O formulário de funcionário não tem dropdown; só a data de admissão vem preenchida.
pub async fn create_form(jar: CookieJar) -> Response {
    render(jar, Page::new("Employees/Create", EmployeeForm::with_defaults(today())))
}

pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<EmployeeForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.employee_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(employee) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success(format!("Employee {} created successfully!", employee.full_name())),
        ),
        Err(e) => render_write_failure(
            jar,
            Page::new("Employees/Create", bound.form),
            e,
            MESSAGES.create_error,
        ),
    }
}

pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.employee_service.get(id).await {
        Ok(employee) => render(jar, Page::new("Employees/Edit", EmployeeForm::from(&employee))),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<EmployeeForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de funcionário: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.employee_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(employee) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success(format!("Employee {} updated successfully!", employee.full_name())),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => render_write_failure(
            jar,
            Page::new("Employees/Edit", bound.form),
            e,
            MESSAGES.update_error,
        ),
    }
}

pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.employee_service.get(id).await {
        Ok(employee) => render(jar, Page::new("Employees/Delete", employee)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// Os registros filhos (presenças, licenças, folhas...) são removidos junto.
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.employee_service.delete(id).await {
        Ok(employee) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success(format!("Employee {} deleted successfully!", employee.full_name())),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
