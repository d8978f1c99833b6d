// src/db/performance_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::performance::{NewPerformance, Performance},
};

#[derive(Clone)]
pub struct PerformanceRepository {
    pool: SqlitePool,
}

impl PerformanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Performance>>, AppError> {
        let sql = format!(
            r#"
            SELECT p.*, {EMPLOYEE_COLUMNS}
            FROM performances p
            LEFT JOIN employees e ON e.id = p.employee_id
            ORDER BY p.review_date DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Performance>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WithEmployee<Performance>>, AppError> {
        let sql = format!(
            r#"
            SELECT p.*, {EMPLOYEE_COLUMNS}
            FROM performances p
            LEFT JOIN employees e ON e.id = p.employee_id
            WHERE p.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Performance>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Performance>, AppError> {
        let row = sqlx::query_as::<_, Performance>("SELECT * FROM performances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &NewPerformance) -> Result<Performance, AppError> {
        let row = sqlx::query_as::<_, Performance>(
            r#"
            INSERT INTO performances (employee_id, review_date, score, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.review_date)
        .bind(input.score.to_string())
        .bind(&input.comments)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, input: &NewPerformance) -> Result<Performance, AppError> {
        sqlx::query_as::<_, Performance>(
            r#"
            UPDATE performances SET
                employee_id = $1, review_date = $2, score = $3, comments = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.review_date)
        .bind(input.score.to_string())
        .bind(&input.comments)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM performances WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM performances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
