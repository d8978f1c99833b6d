// src/handlers.rs
//
// Todas as telas seguem o mesmo formato (Index, Details, Create, Edit, Delete);
// aqui ficam as mensagens por entidade e as respostas de falha compartilhadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::common::{
    error::AppError,
    view::{redirect_with_flash, take_flash, Flash, Page, FIX_ERRORS_MESSAGE},
};

pub mod attendances;
pub mod compliances;
pub mod employees;
pub mod home;
pub mod leaves;
pub mod payrolls;
pub mod performances;
pub mod trainings;
pub mod users;

// ---
// Mensagens por entidade
// ---

pub(crate) struct Messages {
    pub list_path: &'static str,
    pub id_not_provided: &'static str,
    pub not_found: &'static str,
    pub id_mismatch: &'static str,
    pub load_list_error: &'static str,
    pub load_create_error: &'static str,
    pub load_details_error: &'static str,
    pub load_edit_error: &'static str,
    pub load_delete_error: &'static str,
    pub create_error: &'static str,
    pub update_error: &'static str,
    pub delete_error: &'static str,
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Renderiza uma tela consumindo a mensagem flash pendente.
pub(crate) fn render<T: Serialize>(jar: CookieJar, page: Page<T>) -> Response {
    let (jar, flash) = take_flash(jar);
    let page = if page.flash.is_none() { page.with_flash(flash) } else { page };
    (jar, page).into_response()
}

pub(crate) fn redirect_missing_id(jar: CookieJar, messages: &Messages) -> Response {
    redirect_with_flash(jar, messages.list_path, Flash::error(messages.id_not_provided))
}

/// Volta para a listagem: registro inexistente vira "não encontrado", o resto é logado.
pub(crate) fn redirect_on_failure(
    jar: CookieJar,
    messages: &Messages,
    err: AppError,
    generic: &str,
) -> Response {
    let message = match err {
        AppError::NotFound => messages.not_found,
        e => {
            tracing::error!("🔥 {} ({})", generic, e);
            generic
        }
    };
    redirect_with_flash(jar, messages.list_path, Flash::error(message))
}

/// Falha numa escrita: erros corrigíveis voltam para o formulário (422);
/// erros inesperados são logados e o formulário volta com a mensagem genérica.
/// Um flash pendente é descartado, já que a própria tela traz a mensagem.
pub(crate) fn render_write_failure<T: Serialize>(
    jar: CookieJar,
    page: Page<T>,
    err: AppError,
    generic: &str,
) -> Response {
    let (jar, _) = take_flash(jar);

    if err.is_user_fixable() {
        let errors = err.field_messages();
        tracing::warn!("⚠️ Formulário inválido em {}: {:?}", page.view, errors);
        let page = page
            .with_errors(errors)
            .with_flash(Some(Flash::error(FIX_ERRORS_MESSAGE)));
        return (jar, page).into_response();
    }

    tracing::error!("🔥 {} ({})", generic, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        jar,
        page.with_flash(Some(Flash::error(generic))),
    )
        .into_response()
}

/// Opções do dropdown numa re-renderização; se a consulta falhar, a tela segue sem elas.
pub(crate) fn choices_or_empty<T>(choices: Result<Vec<T>, AppError>) -> Vec<T> {
    choices.unwrap_or_else(|e| {
        tracing::error!("🔥 Falha ao carregar funcionários para o formulário: {}", e);
        Vec::new()
    })
}
