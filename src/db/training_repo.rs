// src/db/training_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::training::{NewTraining, Training},
};

#[derive(Clone)]
pub struct TrainingRepository {
    pool: SqlitePool,
}

impl TrainingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Training>>, AppError> {
        let sql = format!(
            r#"
            SELECT t.*, {EMPLOYEE_COLUMNS}
            FROM trainings t
            LEFT JOIN employees e ON e.id = t.employee_id
            ORDER BY t.start_date DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Training>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WithEmployee<Training>>, AppError> {
        let sql = format!(
            r#"
            SELECT t.*, {EMPLOYEE_COLUMNS}
            FROM trainings t
            LEFT JOIN employees e ON e.id = t.employee_id
            WHERE t.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Training>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Training>, AppError> {
        let row = sqlx::query_as::<_, Training>("SELECT * FROM trainings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &NewTraining) -> Result<Training, AppError> {
        let row = sqlx::query_as::<_, Training>(
            r#"
            INSERT INTO trainings (employee_id, training_name, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.training_name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, input: &NewTraining) -> Result<Training, AppError> {
        sqlx::query_as::<_, Training>(
            r#"
            UPDATE trainings SET
                employee_id = $1, training_name = $2, start_date = $3, end_date = $4, status = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.training_name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trainings WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
