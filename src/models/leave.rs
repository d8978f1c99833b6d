// src/models/leave.rs

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
pub struct Leave {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl Leave {
    /// Dias corridos, contando início e fim.
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone)]
pub struct NewLeave {
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct LeaveForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Please select an employee."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(
        required(message = "Please select a leave type."),
        length(max = 50, message = "Leave type cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub leave_type: Option<String>,

    #[validate(required(message = "Start date is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "End date is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,

    #[validate(
        required(message = "Status is required"),
        length(max = 50, message = "Status cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

impl LeaveForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            start_date: Some(today),
            end_date: today.checked_add_days(Days::new(1)),
            status: Some("Pending".to_string()),
            ..Default::default()
        }
    }

    pub fn check(&self) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        // Mesmo dia é permitido (licença de um dia).
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add("end_date", field_error("date_range", "End date must be after start date."));
            }
        }
        errors
    }

    pub fn into_new(self) -> Result<NewLeave, AppError> {
        Ok(NewLeave {
            employee_id: required(self.employee_id, "employee_id")?,
            leave_type: required(self.leave_type, "leave_type")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
            status: required(self.status, "status")?,
        })
    }
}

impl From<&Leave> for LeaveForm {
    fn from(l: &Leave) -> Self {
        Self {
            id: Some(l.id),
            employee_id: Some(l.employee_id),
            leave_type: Some(l.leave_type.clone()),
            start_date: Some(l.start_date),
            end_date: Some(l.end_date),
            status: Some(l.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(start: (i32, u32, u32), end: (i32, u32, u32)) -> LeaveForm {
        LeaveForm {
            employee_id: Some(1),
            leave_type: Some("Annual".into()),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2),
            status: Some("Pending".into()),
            ..Default::default()
        }
    }

    #[test]
    fn end_before_start_is_rejected() {
        let errors = form((2024, 3, 10), (2024, 3, 9)).check();
        assert!(errors.field_errors().contains_key("end_date"));
    }

    #[test]
    fn single_day_leave_is_accepted() {
        assert!(form((2024, 3, 10), (2024, 3, 10)).check().is_empty());
    }

    #[test]
    fn missing_type_uses_select_message() {
        let errors = LeaveForm { leave_type: None, ..form((2024, 3, 10), (2024, 3, 12)) }.check();
        let messages = crate::common::error::field_messages(&errors);
        assert_eq!(messages["leave_type"], vec!["Please select a leave type."]);
    }

    #[test]
    fn total_days_is_inclusive() {
        let leave = Leave {
            id: 1,
            employee_id: 1,
            leave_type: "Sick".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
            status: "Approved".into(),
        };
        assert_eq!(leave.total_days(), 3);
    }
}
