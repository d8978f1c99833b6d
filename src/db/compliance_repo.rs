// src/db/compliance_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::compliance::{Compliance, NewCompliance},
};

#[derive(Clone)]
pub struct ComplianceRepository {
    pool: SqlitePool,
}

impl ComplianceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Compliance>>, AppError> {
        let sql = format!(
            r#"
            SELECT c.*, {EMPLOYEE_COLUMNS}
            FROM compliances c
            LEFT JOIN employees e ON e.id = c.employee_id
            ORDER BY c.acknowledged_on DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Compliance>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WithEmployee<Compliance>>, AppError> {
        let sql = format!(
            r#"
            SELECT c.*, {EMPLOYEE_COLUMNS}
            FROM compliances c
            LEFT JOIN employees e ON e.id = c.employee_id
            WHERE c.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Compliance>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Compliance>, AppError> {
        let row = sqlx::query_as::<_, Compliance>("SELECT * FROM compliances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &NewCompliance) -> Result<Compliance, AppError> {
        let row = sqlx::query_as::<_, Compliance>(
            r#"
            INSERT INTO compliances (employee_id, policy, acknowledged_on, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.policy)
        .bind(input.acknowledged_on)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, input: &NewCompliance) -> Result<Compliance, AppError> {
        sqlx::query_as::<_, Compliance>(
            r#"
            UPDATE compliances SET
                employee_id = $1, policy = $2, acknowledged_on = $3, status = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.policy)
        .bind(input.acknowledged_on)
        .bind(&input.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM compliances WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM compliances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
