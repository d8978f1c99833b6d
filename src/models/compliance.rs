// src/models/compliance.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::common::{
    error::{field_error, AppError},
    form::{empty_string_as_none, is_future, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub id: i64,
    pub employee_id: i64,
    pub policy: String,
    pub acknowledged_on: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewCompliance {
    pub employee_id: i64,
    pub policy: String,
    pub acknowledged_on: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ComplianceForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Employee is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Policy is required"),
        length(max = 200, message = "Policy cannot be longer than 200 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub policy: Option<String>,

    #[validate(required(message = "Acknowledgment date is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub acknowledged_on: Option<NaiveDate>,

    #[validate(
        required(message = "Status is required"),
        length(max = 50, message = "Status cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

impl ComplianceForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            acknowledged_on: Some(today),
            status: Some("Pending".to_string()),
            ..Default::default()
        }
    }

    pub fn check(&self, today: NaiveDate) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(acknowledged_on) = self.acknowledged_on {
            if is_future(acknowledged_on, today) {
                errors.add(
                    "acknowledged_on",
                    field_error("future_date", "Acknowledgment date cannot be in the future."),
                );
            }
        }
        errors
    }

    pub fn into_new(self) -> Result<NewCompliance, AppError> {
        Ok(NewCompliance {
            employee_id: required(self.employee_id, "employee_id")?,
            policy: required(self.policy, "policy")?,
            acknowledged_on: required(self.acknowledged_on, "acknowledged_on")?,
            status: required(self.status, "status")?,
        })
    }
}

impl From<&Compliance> for ComplianceForm {
    fn from(c: &Compliance) -> Self {
        Self {
            id: Some(c.id),
            employee_id: Some(c.employee_id),
            policy: Some(c.policy.clone()),
            acknowledged_on: Some(c.acknowledged_on),
            status: Some(c.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgment_in_the_future_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let form = ComplianceForm {
            employee_id: Some(1),
            policy: Some("Code of Conduct".into()),
            acknowledged_on: NaiveDate::from_ymd_opt(2024, 3, 1),
            status: Some("Acknowledged".into()),
            ..Default::default()
        };

        assert!(form.check(today).field_errors().contains_key("acknowledged_on"));
        assert!(ComplianceForm { acknowledged_on: Some(today), ..form }.check(today).is_empty());
    }

    #[test]
    fn policy_length_is_limited() {
        let form = ComplianceForm {
            policy: Some("x".repeat(201)),
            ..ComplianceForm::with_defaults(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("policy"));
    }
}
