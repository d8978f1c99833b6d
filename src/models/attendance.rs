// src/models/attendance.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::common::{
    error::{field_error, AppError},
    form::{empty_string_as_none, optional_time, required},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_time: Option<NaiveTime>,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub check_in_time: NaiveTime,
    pub check_out_time: Option<NaiveTime>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AttendanceForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i64>,

    #[validate(required(message = "Employee is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub employee_id: Option<i64>,

    #[validate(required(message = "Date is required"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "Check-in time is required"))]
    #[serde(default, deserialize_with = "optional_time")]
    pub check_in_time: Option<NaiveTime>,

    #[serde(default, deserialize_with = "optional_time")]
    pub check_out_time: Option<NaiveTime>,

    #[validate(
        required(message = "Status is required"),
        length(max = 50, message = "Status cannot be longer than 50 characters")
    )]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
}

impl AttendanceForm {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            date: Some(today),
            check_in_time: NaiveTime::from_hms_opt(9, 0, 0),
            status: Some("Present".to_string()),
            ..Default::default()
        }
    }

    /// Regras do formulário + regras entre campos.
    pub fn check(&self) -> ValidationErrors {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let (Some(check_in), Some(check_out)) = (self.check_in_time, self.check_out_time) {
            if check_out <= check_in {
                errors.add(
                    "check_out_time",
                    field_error("after_check_in", "Check-out time must be after check-in time."),
                );
            }
        }
        errors
    }

    pub fn into_new(self) -> Result<NewAttendance, AppError> {
        Ok(NewAttendance {
            employee_id: required(self.employee_id, "employee_id")?,
            date: required(self.date, "date")?,
            check_in_time: required(self.check_in_time, "check_in_time")?,
            check_out_time: self.check_out_time,
            status: required(self.status, "status")?,
        })
    }
}

impl From<&Attendance> for AttendanceForm {
    fn from(a: &Attendance) -> Self {
        Self {
            id: Some(a.id),
            employee_id: Some(a.employee_id),
            date: Some(a.date),
            check_in_time: Some(a.check_in_time),
            check_out_time: a.check_out_time,
            status: Some(a.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(check_in: (u32, u32, u32), check_out: Option<(u32, u32, u32)>) -> AttendanceForm {
        AttendanceForm {
            employee_id: Some(1),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            check_in_time: NaiveTime::from_hms_opt(check_in.0, check_in.1, check_in.2),
            check_out_time: check_out.and_then(|(h, m, s)| NaiveTime::from_hms_opt(h, m, s)),
            status: Some("Present".into()),
            ..Default::default()
        }
    }

    #[test]
    fn equal_check_out_is_rejected() {
        let errors = form((9, 0, 0), Some((9, 0, 0))).check();
        assert!(errors.field_errors().contains_key("check_out_time"));
    }

    #[test]
    fn earlier_check_out_is_rejected() {
        let errors = form((9, 0, 0), Some((8, 59, 59))).check();
        assert!(errors.field_errors().contains_key("check_out_time"));
    }

    #[test]
    fn one_second_later_is_accepted() {
        assert!(form((9, 0, 0), Some((9, 0, 1))).check().is_empty());
    }

    #[test]
    fn check_out_is_optional() {
        assert!(form((9, 0, 0), None).check().is_empty());
    }

    #[test]
    fn defaults_use_nine_o_clock_and_present() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let defaults = AttendanceForm::with_defaults(today);
        assert_eq!(defaults.date, Some(today));
        assert_eq!(defaults.check_in_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(defaults.status.as_deref(), Some("Present"));
    }
}
