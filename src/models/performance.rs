// src/models/performance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::{
    db_utils::decimal_column,
    error::{field_error, AppError},
    form::{empty_string_as_none, empty_text_as_none, is_future, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: i64,
    pub employee_id: i64,
    pub review_date: NaiveDate,
    pub score: Decimal,
    pub comments: String,
}

impl<'r> FromRow<'r, SqliteRow> for Performance {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            employee_id: row.try_get("employee_id")?,
            review_date: row.try_get("review_date")?,
            score: decimal_column(row, "score")?,
            comments: row.try_get("comments")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewPerformance {
    pub employee_id: i64,
    pub review_date: NaiveDate,
    pub score: Decimal,
    pub comments: String,
}

fn validate_score(score: &Decimal) -> Result<(), ValidationError> {
    if *score < Decimal::ONE || *score > Decimal::new(5, 0) {
        let mut err = ValidationError::new("range");
        err.message = Some("Score must be between 1.0 and 5.0.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PerformanceForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Please select an employee."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(required(message = "Review date is required."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub review_date: Option<NaiveDate>,

    #[validate(required(message = "Score is required."), custom(function = "validate_score"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub score: Option<Decimal>,

    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub comments: Option<String>,
}

impl PerformanceForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            review_date: Some(today),
            score: Some(Decimal::new(30, 1)),
            ..Default::default()
        }
    }

    pub fn check(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(review_date) = self.review_date {
            if is_future(review_date, today) {
                errors.add(
                    "review_date",
                    field_error("future_date", "Review date cannot be in the future."),
                );
            }
        }
        errors
    }

    pub fn into_new(self) -> Result<NewPerformance, AppError> {
        Ok(NewPerformance {
            employee_id: required(self.employee_id, "employee_id")?,
            review_date: required(self.review_date, "review_date")?,
            score: required(self.score, "score")?,
            comments: self.comments.unwrap_or_default(),
        })
    }
}

impl From<&Performance> for PerformanceForm {
    fn from(p: &Performance) -> Self {
        Self {
            id: Some(p.id),
            employee_id: Some(p.employee_id),
            review_date: Some(p.review_date),
            score: Some(p.score),
            comments: Some(p.comments.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use std::str::FromStr;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn form(score: &str) -> PerformanceForm {
        PerformanceForm {
            employee_id: Some(1),
            review_date: Some(today()),
            score: Some(Decimal::from_str(score).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn score_boundaries() {
        assert!(form("0.999").check(today()).field_errors().contains_key("score"));
        assert!(form("1.0").check(today()).is_empty());
        assert!(form("5.0").check(today()).is_empty());
        assert!(form("5.001").check(today()).field_errors().contains_key("score"));
    }

    #[test]
    fn review_date_tomorrow_is_rejected() {
        let tomorrow = today().checked_add_days(Days::new(1));
        let errors = PerformanceForm { review_date: tomorrow, ..form("3.5") }.check(today());
        assert!(errors.field_errors().contains_key("review_date"));
    }

    #[test]
    fn comments_are_optional() {
        let new = form("4").into_new().unwrap();
        assert_eq!(new.comments, "");
    }
}
