use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

// Chave usada para mensagens que não pertencem a um campo específico.
pub const FORM_LEVEL: &str = "__all__";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    /// Erros que o usuário consegue corrigir no próprio formulário.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_) | AppError::UniqueConstraintViolation(_)
        )
    }

    /// Mensagens por campo, no formato que a view consome.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            AppError::ValidationError(errors) => field_messages(errors),
            AppError::UniqueConstraintViolation(message) => {
                BTreeMap::from([(FORM_LEVEL.to_string(), vec![message.clone()])])
            }
            _ => BTreeMap::new(),
        }
    }
}

/// Monta um `ValidationError` com código e mensagem legível.
pub fn field_error(code: &'static str, message: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    err
}

/// Atalho para um `AppError` de validação com um único campo.
pub fn validation_error(field: &'static str, code: &'static str, message: &str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error(code, message));
    AppError::ValidationError(errors)
}

/// Fecha a coleta de erros: vazio segue em frente, senão vira `AppError::ValidationError`.
pub fn ensure_valid(errors: ValidationErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

// Só é usado quando um handler deixa o erro escapar (ex.: rejeições);
// o fluxo normal converte tudo em redirect ou formulário re-renderizado.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(_) | AppError::UniqueConstraintViolation(_) => {
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": self.field_messages(),
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Record not found."),
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again.",
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_messages_prefers_message_over_code() {
        let mut errors = ValidationErrors::new();
        errors.add("score", field_error("range", "Score must be between 1.0 and 5.0."));
        errors.add("status", ValidationError::new("required"));

        let messages = field_messages(&errors);

        assert_eq!(messages["score"], vec!["Score must be between 1.0 and 5.0."]);
        assert_eq!(messages["status"], vec!["required"]);
    }

    #[test]
    fn unique_violation_is_reported_at_form_level() {
        let err = AppError::UniqueConstraintViolation("Username already exists.".into());

        assert!(err.is_user_fixable());
        assert_eq!(err.field_messages()[FORM_LEVEL], vec!["Username already exists."]);
    }
}
