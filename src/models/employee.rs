// src/models/employee.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::{
    db_utils::decimal_column,
    error::AppError,
    form::{empty_string_as_none, empty_text_as_none, required, validate_not_negative},
};

// --- ENTIDADE ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Manual por causa do salário guardado como TEXT.
impl<'r> FromRow<'r, SqliteRow> for Employee {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            position: row.try_get("position")?,
            hire_date: row.try_get("hire_date")?,
            salary: decimal_column(row, "salary")?,
        })
    }
}

/// Dados já validados, prontos para INSERT/UPDATE.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
}

// --- FORMULÁRIO ---

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < 7 {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct EmployeeForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(
        required(message = "First name is required"),
        length(max = 100, message = "First name cannot be longer than 100 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last name is required"),
        length(max = 100, message = "Last name cannot be longer than 100 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub last_name: Option<String>,

    #[validate(required(message = "Email is required"), email(message = "Invalid email address"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "Department cannot be longer than 100 characters"))]
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub department: Option<String>,

    #[validate(length(max = 100, message = "Position cannot be longer than 100 characters"))]
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub position: Option<String>,

    #[validate(required(message = "Hire date is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub hire_date: Option<NaiveDate>,

    #[validate(
        required(message = "Salary is required"),
        custom(function = "validate_not_negative")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub salary: Option<Decimal>,
}

impl EmployeeForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self { hire_date: Some(today), ..Default::default() }
    }

    pub fn check(&self) -> ValidationErrors {
        self.validate().err().unwrap_or_else(ValidationErrors::new)
    }

    pub fn into_new(self) -> Result<NewEmployee, AppError> {
        Ok(NewEmployee {
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
            email: required(self.email, "email")?,
            phone: self.phone,
            department: self.department,
            position: self.position,
            hire_date: required(self.hire_date, "hire_date")?,
            salary: required(self.salary, "salary")?,
        })
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(e: &Employee) -> Self {
        Self {
            id: Some(e.id),
            first_name: Some(e.first_name.clone()),
            last_name: Some(e.last_name.clone()),
            email: Some(e.email.clone()),
            phone: e.phone.clone(),
            department: e.department.clone(),
            position: e.position.clone(),
            hire_date: Some(e.hire_date),
            salary: Some(e.salary),
        }
    }
}
