// src/handlers/leaves.rs

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
    models::leave::{Leave, LeaveForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Leaves",
    id_not_provided: "Leave ID not provided.",
    not_found: "Leave record not found.",
    id_mismatch: "Leave ID mismatch.",
    load_list_error: "Error loading leave records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading leave details.",
    load_edit_error: "Error loading leave for editing.",
    load_delete_error: "Error loading leave for deletion.",
    create_error: "Error creating leave request. Please try again.",
    update_error: "Error updating leave request. Please try again.",
    delete_error: "Error deleting leave request. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Leaves", get(index))
        .route("/Leaves/Index", get(index))
        .route("/Leaves/Details", get(missing_id))
        .route("/Leaves/Details/{id}", get(details))
        .route("/Leaves/Create", get(create_form).post(create))
        .route("/Leaves/Edit", get(missing_id))
        .route("/Leaves/Edit/{id}", get(edit_form).post(edit))
        .route("/Leaves/Delete", get(missing_id))
        .route("/Leaves/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Leaves
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.leave_service.list().await {
        Ok(records) => render(jar, Page::new("Leaves/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar licenças: {}", e);
            let page = Page::new("Leaves/Index", Vec::<WithEmployee<Leave>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Leaves/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.leave_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Leaves/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Leaves/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.leave_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Leaves/Create", LeaveForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Leaves/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<LeaveForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.leave_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Leave request created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.leave_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Leaves/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Leaves/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.leave_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Leaves/Edit", LeaveForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Leaves/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<LeaveForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de licença: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.leave_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Leave request updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.leave_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Leaves/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Leaves/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.leave_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Leaves/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Leaves/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.leave_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Leave request deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
