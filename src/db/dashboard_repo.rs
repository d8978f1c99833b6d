// src/db/dashboard_repo.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Resumo geral da página inicial
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM employees)   AS total_employees,
                (SELECT COUNT(*) FROM attendances) AS total_attendance,
                (SELECT COUNT(*) FROM leaves)      AS total_leaves
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}
