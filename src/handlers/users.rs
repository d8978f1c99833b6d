// src/handlers/users.rs

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
        Messages,
    },
    models::user::{User, UserEditForm, UserForm},
};

const MESSAGES: Messages = Messages {
    list_path: "/Users",
    id_not_provided: "User ID not provided.",
    not_found: "User account not found.",
    id_mismatch: "User ID mismatch.",
    load_list_error: "Error loading user accounts. Please try again.",
    load_create_error: "Error loading create form.",
    load_details_error: "Error loading user details.",
    load_edit_error: "Error loading user for editing.",
    load_delete_error: "Error loading user for deletion.",
    create_error: "Error creating user account. Please try again.",
    update_error: "Error updating user account. Please try again.",
    delete_error: "Error deleting user account. Please try again.",
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/Users", get(index))
        .route("/Users/Index", get(index))
        .route("/Users/Details", get(missing_id))
        .route("/Users/Details/{id}", get(details))
        .route("/Users/Create", get(create_form).post(create))
        .route("/Users/Edit", get(missing_id))
        .route("/Users/Edit/{id}", get(edit_form).post(edit))
        .route("/Users/Delete", get(missing_id))
        .route("/Users/Delete/{id}", get(delete_confirm).post(delete))
}

pub async fn index(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.user_service.list().await {
        Ok(users) => render(jar, Page::new("Users/Index", users)),
        Err(e) => {
            tracing::error!("🔥 Falha ao listar contas: {}", e);
            let page = Page::new("Users/Index", Vec::<WithEmployee<User>>::new())
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
    match app_state.user_service.get_detail(id).await {
        Ok(user) => render(jar, Page::new("Users/Details", user)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_details_error),
    }
}

// Só aparecem funcionários que ainda não têm conta.
pub async fn create_form(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    match app_state.user_service.employee_choices(None, None).await {
        Ok(employees) => {
            let page = Page::new("Users/Create", UserForm::with_defaults()).with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_create_error),
    }
}

pub async fn create(
    State(app_state): State<AppState>,
    jar: CookieJar,
    bound: Bound<UserForm>,
) -> Response {
    let result = match bound.converted() {
        Ok(form) => app_state.user_service.create(form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("User account created successfully!"),
        ),
        Err(e) => {
            let employees = choices_or_empty(
                app_state.user_service.employee_choices(None, bound.form.employee_id).await,
            );
            let page = Page::new("Users/Create", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.create_error)
        }
    }
}

// Na edição o dono atual continua disponível no dropdown.
pub async fn edit_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let service = &app_state.user_service;
    let loaded = async {
        let user = service.get(id).await?;
        let employees = service
            .employee_choices(Some(user.employee_id), Some(user.employee_id))
            .await?;
        Ok::<_, AppError>((user, employees))
    };

    match loaded.await {
        Ok((user, employees)) => {
            let page = Page::new("Users/Edit", UserEditForm::from(&user)).with_employees(employees);
            render(jar, page)
        }
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_edit_error),
    }
}

pub async fn edit(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    bound: Bound<UserEditForm>,
) -> Response {
    if bound.form.id != Some(id) {
        tracing::warn!("⚠️ ID divergente na edição de conta: rota {} / formulário {:?}", id, bound.form.id);
        return redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.id_mismatch));
    }

    let service = &app_state.user_service;
    let result = match bound.converted() {
        Ok(form) => service.update(id, form).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(_) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("User account updated successfully!"),
        ),
        Err(AppError::NotFound) => {
            redirect_with_flash(jar, MESSAGES.list_path, Flash::error(MESSAGES.not_found))
        }
        Err(e) => {
            let owner = service.get(id).await.ok().map(|u| u.employee_id);
            let employees = choices_or_empty(service.employee_choices(owner, bound.form.employee_id).await);
            let page = Page::new("Users/Edit", bound.form).with_employees(employees);
            render_write_failure(jar, page, e, MESSAGES.update_error)
        }
    }
}

pub async fn delete_confirm(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.user_service.get_detail(id).await {
        Ok(user) => render(jar, Page::new("Users/Delete", user)),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.load_delete_error),
    }
}

pub async fn delete(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    match app_state.user_service.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            MESSAGES.list_path,
            Flash::success("User account deleted successfully!"),
        ),
        Err(e) => redirect_on_failure(jar, &MESSAGES, e, MESSAGES.delete_error),
    }
}
