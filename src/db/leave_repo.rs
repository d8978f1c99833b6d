// src/db/leave_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::leave::{Leave, NewLeave},
};

#[derive(Clone)]
pub struct LeaveRepository {
    pool: SqlitePool,
}

impl LeaveRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Leave>>, AppError> {
        let sql = format!(
            r#"
            SELECT l.*, {EMPLOYEE_COLUMNS}
            FROM leaves l
            LEFT JOIN employees e ON e.id = l.employee_id
            ORDER BY l.start_date DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Leave>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(&self, id: i64) -> Result<Option<WithEmployee<Leave>>, AppError> {
        let sql = format!(
            r#"
            SELECT l.*, {EMPLOYEE_COLUMNS}
            FROM leaves l
            LEFT JOIN employees e ON e.id = l.employee_id
            WHERE l.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Leave>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Leave>, AppError> {
        let row = sqlx::query_as::<_, Leave>("SELECT * FROM leaves WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &NewLeave) -> Result<Leave, AppError> {
        let row = sqlx::query_as::<_, Leave>(
            r#"
            INSERT INTO leaves (employee_id, leave_type, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.leave_type)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, input: &NewLeave) -> Result<Leave, AppError> {
        sqlx::query_as::<_, Leave>(
            r#"
            UPDATE leaves SET
                employee_id = $1, leave_type = $2, start_date = $3, end_date = $4, status = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.leave_type)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM leaves WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leaves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
