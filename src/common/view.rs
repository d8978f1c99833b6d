// src/common/view.rs
//
// Contrato com a camada de apresentação: as telas recebem um `Page`
// (nome da view + modelo + opções do dropdown + erros + flash) e as escritas
// respondem com 303 + mensagem flash de uso único em cookie.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::common::db_utils::EmployeeRef;

pub const FLASH_COOKIE_NAME: &str = "_flash";

pub const FIX_ERRORS_MESSAGE: &str = "Please fix the validation errors below.";

// ---
// Flash
// ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }
}

/// Lê a mensagem flash e já agenda a remoção do cookie (leitura única).
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE_NAME) else {
        return (jar, None);
    };
    let flash = serde_json::from_str::<Flash>(cookie.value()).ok();
    let jar = jar.remove(Cookie::build(FLASH_COOKIE_NAME).path("/"));
    (jar, flash)
}

fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    match serde_json::to_string(flash) {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE_NAME, value))
                .path("/")
                .http_only(true),
        ),
        Err(e) => {
            tracing::error!("Falha ao serializar mensagem flash: {}", e);
            jar
        }
    }
}

/// POST → 303 para `to`, levando a mensagem para a próxima tela.
pub fn redirect_with_flash(jar: CookieJar, to: &str, flash: Flash) -> Response {
    (set_flash(jar, &flash), Redirect::to(to)).into_response()
}

// ---
// Dropdown de funcionários
// ---

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub text: String,
    pub selected: bool,
}

/// "First Last (Department)", na ordem em que o repositório devolveu.
pub fn employee_choices(employees: &[EmployeeRef], selected: Option<i64>) -> Vec<SelectOption> {
    employees
        .iter()
        .map(|e| {
            let text = match e.department.as_deref().map(str::trim) {
                Some(dept) if !dept.is_empty() => format!("{} ({})", e.full_name(), dept),
                _ => e.full_name(),
            };
            SelectOption { value: e.id, text, selected: Some(e.id) == selected }
        })
        .collect()
}

// ---
// Page
// ---

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub view: &'static str,
    pub model: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl<T> Page<T> {
    pub fn new(view: &'static str, model: T) -> Self {
        Self { view, model, employees: None, errors: BTreeMap::new(), flash: None }
    }

    pub fn with_employees(mut self, employees: Vec<SelectOption>) -> Self {
        self.employees = Some(employees);
        self
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        self.flash = flash;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        // Formulário com erros volta como 422 para o cliente distinguir do GET normal.
        let status = if self.errors.is_empty() {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        (status, Json(self)).into_response()
    }
}
