// src/models/training.rs

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::common::{
    error::{field_error, AppError},
    form::{empty_string_as_none, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: i64,
    pub employee_id: i64,
    pub training_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewTraining {
    pub employee_id: i64,
    pub training_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TrainingForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Please select an employee."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Training name is required."),
        length(max = 200, message = "Training name cannot be longer than 200 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub training_name: Option<String>,

    #[validate(required(message = "Start date is required."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "End date is required."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,

    #[validate(
        required(message = "Status is required."),
        length(max = 50, message = "Status cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

impl TrainingForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            start_date: Some(today),
            end_date: today.checked_add_days(Days::new(1)),
            status: Some("Scheduled".to_string()),
            ..Default::default()
        }
    }

    pub fn check(&self) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add("end_date", field_error("date_range", "End date must be after start date."));
            }
        }
        errors
    }

    pub fn into_new(self) -> Result<NewTraining, AppError> {
        Ok(NewTraining {
            employee_id: required(self.employee_id, "employee_id")?,
            training_name: required(self.training_name, "training_name")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
            status: required(self.status, "status")?,
        })
    }
}

impl From<&Training> for TrainingForm {
    fn from(t: &Training) -> Self {
        Self {
            id: Some(t.id),
            employee_id: Some(t.employee_id),
            training_name: Some(t.training_name.clone()),
            start_date: Some(t.start_date),
            end_date: Some(t.end_date),
            status: Some(t.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(start: u32, end: u32) -> TrainingForm {
        TrainingForm {
            employee_id: Some(1),
            training_name: Some("Fire Safety".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 4, start),
            end_date: NaiveDate::from_ymd_opt(2024, 4, end),
            status: Some("Scheduled".into()),
            ..Default::default()
        }
    }

    #[test]
    fn date_range_rules() {
        assert!(form(10, 9).check().field_errors().contains_key("end_date"));
        assert!(form(10, 10).check().is_empty());
        assert!(form(10, 11).check().is_empty());
    }

    #[test]
    fn defaults_are_scheduled_for_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let defaults = TrainingForm::with_defaults(today);
        assert_eq!(defaults.end_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(defaults.status.as_deref(), Some("Scheduled"));
    }
}
