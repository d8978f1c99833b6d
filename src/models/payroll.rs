// src/models/payroll.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use validator::{Validate, ValidationErrors};

use crate::common::{
    db_utils::decimal_column,
    error::{field_error, validation_error, AppError, FORM_LEVEL},
    form::{empty_string_as_none, required, validate_not_negative},
};

pub const DUPLICATE_PERIOD_MESSAGE: &str =
    "A payroll record already exists for this employee for the selected month and year.";

pub const NET_PAY_OVERFLOW_MESSAGE: &str =
    "Net pay is too large to be stored. Please check salary, bonus and deductions.";

/// Salário + bônus - descontos; `None` quando o resultado estoura o `Decimal`.
fn compute_net_pay(salary: Decimal, bonus: Decimal, deductions: Decimal) -> Option<Decimal> {
    salary.checked_add(bonus)?.checked_sub(deductions)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub month: i32,
    pub year: i32,
    pub salary: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub net_pay: Decimal,
}

impl<'r> FromRow<'r, SqliteRow> for Payroll {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            employee_id: row.try_get("employee_id")?,
            month: row.try_get("month")?,
            year: row.try_get("year")?,
            salary: decimal_column(row, "salary")?,
            bonus: decimal_column(row, "bonus")?,
            deductions: decimal_column(row, "deductions")?,
            net_pay: decimal_column(row, "net_pay")?,
        })
    }
}

/// Valores validados; o líquido é sempre calculado aqui, nunca vem do formulário.
#[derive(Debug, Clone)]
pub struct NewPayroll {
    pub employee_id: i64,
    pub month: i32,
    pub year: i32,
    pub salary: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
}

impl NewPayroll {
    pub fn net_pay(&self) -> Result<Decimal, AppError> {
        compute_net_pay(self.salary, self.bonus, self.deductions)
            .ok_or_else(|| validation_error(FORM_LEVEL, "net_pay_overflow", NET_PAY_OVERFLOW_MESSAGE))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PayrollForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Please select an employee."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Month is required."),
        range(min = 1, max = 12, message = "Month must be between 1 and 12.")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub month: Option<i32>,

    #[validate(
        required(message = "Year is required."),
        range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100.")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub year: Option<i32>,

    #[validate(required(message = "Salary is required."), custom(function = "validate_not_negative"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub salary: Option<Decimal>,

    // Bônus e descontos em branco contam como zero.
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub bonus: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub deductions: Option<Decimal>,
}

impl PayrollForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            month: Some(today.month() as i32),
            year: Some(today.year()),
            salary: Some(Decimal::ZERO),
            bonus: Some(Decimal::ZERO),
            deductions: Some(Decimal::ZERO),
            ..Default::default()
        }
    }

    pub fn check(&self) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(salary) = self.salary {
            let bonus = self.bonus.unwrap_or(Decimal::ZERO);
            let deductions = self.deductions.unwrap_or(Decimal::ZERO);
            if compute_net_pay(salary, bonus, deductions).is_none() {
                errors.add(FORM_LEVEL, field_error("net_pay_overflow", NET_PAY_OVERFLOW_MESSAGE));
            }
        }
        errors
    }

    /// Chave do período, quando o formulário tem os três campos.
    pub fn period(&self) -> Option<(i64, i32, i32)> {
        Some((self.employee_id?, self.month?, self.year?))
    }

    pub fn into_new(self) -> Result<NewPayroll, AppError> {
        Ok(NewPayroll {
            employee_id: required(self.employee_id, "employee_id")?,
            month: required(self.month, "month")?,
            year: required(self.year, "year")?,
            salary: required(self.salary, "salary")?,
            bonus: self.bonus.unwrap_or(Decimal::ZERO),
            deductions: self.deductions.unwrap_or(Decimal::ZERO),
        })
    }
}

impl From<&Payroll> for PayrollForm {
    fn from(p: &Payroll) -> Self {
        Self {
            id: Some(p.id),
            employee_id: Some(p.employee_id),
            month: Some(p.month),
            year: Some(p.year),
            salary: Some(p.salary),
            bonus: Some(p.bonus),
            deductions: Some(p.deductions),
        }
    }
}
