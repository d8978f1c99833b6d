// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;

// Os cards da tela inicial
#[derive(Debug, Clone, Default, Serialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub total_attendance: i64,
    pub total_leaves: i64,
}
