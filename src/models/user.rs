// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::common::{
    error::AppError,
    form::{empty_password_as_none, empty_string_as_none, required},
};

pub const DUPLICATE_USERNAME_MESSAGE: &str =
    "Username already exists. Please choose a different username.";
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "This employee already has a user account.";

// Representa uma conta vinda do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub employee_id: i64,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub employee_id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Alteração de conta; `password_hash` só vem quando uma nova senha foi informada.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub employee_id: i64,
    pub username: String,
    pub password_hash: Option<String>,
    pub role: String,
}

// Dados para criação de conta
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct UserForm {
    #[validate(required(message = "Employee is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Username is required"),
        length(max = 50, message = "Username cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub username: Option<String>,

    #[validate(
        required(message = "Password is required."),
        length(min = 6, message = "Password must be at least 6 characters long.")
    )]
    #[serde(default, deserialize_with = "empty_password_as_none", skip_serializing)]
    pub password: Option<String>,

    #[validate(
        required(message = "Role is required"),
        length(max = 50, message = "Role cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<String>,
}

impl UserForm {
    pub fn with_defaults() -> Self {
        Self { role: Some("User".to_string()), ..Default::default() }
    }

    pub fn check(&self) -> ValidationErrors {
        self.validate().err().unwrap_or_else(ValidationErrors::new)
    }

    /// (employee_id, username, senha em texto, role); a senha ainda será hasheada.
    pub fn into_parts(self) -> Result<(i64, String, String, String), AppError> {
        Ok((
            required(self.employee_id, "employee_id")?,
            required(self.username, "username")?,
            required(self.password, "password")?,
            required(self.role, "role")?,
        ))
    }
}

// Dados para edição; senha em branco mantém a atual
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct UserEditForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Employee is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Username is required"),
        length(max = 50, message = "Username cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub username: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    #[serde(default, deserialize_with = "empty_password_as_none", skip_serializing)]
    pub new_password: Option<String>,

    #[validate(
        required(message = "Role is required"),
        length(max = 50, message = "Role cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<String>,
}

impl UserEditForm {
    pub fn check(&self) -> ValidationErrors {
        self.validate().err().unwrap_or_else(ValidationErrors::new)
    }

    pub fn into_changes(self, password_hash: Option<String>) -> Result<UserChanges, AppError> {
        Ok(UserChanges {
            employee_id: required(self.employee_id, "employee_id")?,
            username: required(self.username, "username")?,
            password_hash,
            role: required(self.role, "role")?,
        })
    }
}

impl From<&User> for UserEditForm {
    fn from(u: &User) -> Self {
        Self {
            id: Some(u.id),
            employee_id: Some(u.employee_id),
            username: Some(u.username.clone()),
            new_password: None,
            role: Some(u.role.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str) -> UserForm {
        UserForm {
            employee_id: Some(1),
            username: Some("jdoe".into()),
            password: Some(password.into()),
            role: Some("Admin".into()),
        }
    }

    #[test]
    fn password_length_boundary() {
        assert!(form("12345").check().field_errors().contains_key("password"));
        assert!(form("123456").check().is_empty());
    }

    #[test]
    fn password_is_never_serialized() {
        let json = serde_json::to_value(form("secret1")).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "jdoe");
    }

    #[test]
    fn blank_new_password_is_allowed_on_edit() {
        let edit = UserEditForm {
            id: Some(1),
            employee_id: Some(1),
            username: Some("jdoe".into()),
            new_password: None,
            role: Some("User".into()),
        };
        assert!(edit.check().is_empty());

        let short = UserEditForm { new_password: Some("abc".into()), ..edit };
        assert!(short.check().field_errors().contains_key("new_password"));
    }
}
