// src/handlers/trainings.rs

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
    models::training::{Training, TrainingForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Trainings",
    id_not_provided: "Training ID not provided.",
    not_found: "Training record not found.",
    id_mismatch: "Training ID mismatch.",
    load_list_error: "Error loading training records. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading training details.",
    load_edit_error: "Error loading training for editing.",
    load_delete_error: "Error loading training for deletion.",
    create_error: "Error creating training record. Please try again.",
    update_error: "Error updating training record. Please try again.",
    delete_error: "Error deleting training record. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Trainings", get(index))
        .route("/Trainings/Index", get(index))
        .route("/Trainings/Details", get(missing_id))
        .route("/Trainings/Details/{id}", get(details))
        .route("/Trainings/Create", get(create_form).post(create))
        .route("/Trainings/Edit", get(missing_id))
        .route("/Trainings/Edit/{id}", get(edit_form).post(edit))
        .route("/Trainings/Delete", get(missing_id))
        .route("/Trainings/Delete/{id}", get(delete_confirm).post(delete))
}

// GET /Trainings
pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.training_service.list().await {
        Ok(records) => render(jar, Page::new("Trainings/Index", records)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar treinamentos: {}", e);
            let page = Page::new("Trainings/Index", Vec::<WithEmployee<Training>>::new())
                .with_flash(Some(Flash::error(MESSAGES.load_list_error)));
            render(jar, page)
        }
    }
}

async fn missing_id(jar: CookieJar) -> Response {
    redirect_missing_id(jar, &MESSAGES)
}

// GET /Trainings/Details/{id}
pub async fn details(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.training_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Trainings/Details", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// GET /Trainings/Create
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.training_service.employee_choices(None).await {
        Ok(employees) => {
            let page = Page::new("Trainings/Create", TrainingForm::with_defaults(today()))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

// POST /Trainings/Create
pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<TrainingForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.training_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Training record created successfully!"),
        ),
        Err(e) => {
            let employees =
                choices_or_empty(app_state.training_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Trainings/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// GET /Trainings/Edit/{id}
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.training_service;
    let loaded = async {
        let record = service.get(id).await?;
        let employees = service.employee_choices(Some(record.employee_id)).await?;
        Ok::<_, AppError>((record, employees))
    };

    match loaded.await {
        Ok((record, employees)) => {
            let page = Page::new("Trainings/Edit", TrainingForm::from(&record))
                .with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

// POST /Trainings/Edit/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<TrainingForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de treinamento: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let result = match bound.converted() {
        Ok(form) => app_state.training_service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Training record updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let employees =
                choices_or_empty(app_state.training_service.employee_choices(bound.form.employee_id).await);
            let page = Page::new("Trainings/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

// GET /Trainings/Delete/{id}
pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.training_service.get_detail(id).await {
        Ok(record) => render(jar, Page::new("Trainings/Delete", record)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

// POST /Trainings/Delete/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.training_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("Training record deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
