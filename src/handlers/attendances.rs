// src/handlers/attendances.rs

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
    models::attendance::{Attendance, AttendanceForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Attendances",
    id_not_provided: "Attendance ID not provided.",
    not_found: "Attendance record not found.",
    id_mismatch: "Attendance ID mismatch.",
    load_list_error: "Error loading attendance records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading attendance details.",
    load_edit_error: "Error loading attendance for editing.",
    load_delete_error: "Error loading attendance for deletion.",
    create_error: "Error creating attendance record. Please try again.",
    update_error: "Error updating attendance record. Please try again.",
    delete_error: "Error deleting attendance record. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Attendances", get(index))
        .route("/Attendances/Index", get(index))
        .route("/Attendances/Details", get(missing_id))
        .route("/Attendances/Details/{id}", get(details))
        .route("/Attendances/Create", get(create_form).post(create))
        .route("/Attendances/Edit", get(missing_id))
        .route("/Attendances/Edit/{id}", get(edit_form).post(edit))
        .route("/Attendances/Delete", get(missing_id))
        .route("/Attendances/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Attendances
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.attendance_service.list().await {
        Ok(records) => render(jar, Page::new("Attendances/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar presenças: {}", e);
            let page = Page::new("Attendances/Index", Vec::<WithEmployee<Attendance>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Attendances/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.attendance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Attendances/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Attendances/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.attendance_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Attendances/Create", AttendanceForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Attendances/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<AttendanceForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.attendance_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Attendance record created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.attendance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Attendances/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Attendances/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.attendance_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Attendances/Edit", AttendanceForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Attendances/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<AttendanceForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de presença: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.attendance_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Attendance record updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.attendance_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Attendances/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Attendances/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.attendance_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Attendances/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Attendances/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.attendance_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Attendance record deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
