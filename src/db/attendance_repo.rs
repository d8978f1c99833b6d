// src/db/attendance_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::attendance::{Attendance, NewAttendance},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lista os registros de presença, mais recentes primeiro.
    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Attendance>>, AppError> {
        let sql = format!(
            r#"
            SELECT a.*, {EMPLOYEE_COLUMNS}
            FROM attendances a
            LEFT JOIN employees e ON e.id = a.employee_id
            ORDER BY a.date DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Attendance>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WithEmployee<Attendance>>, AppError> {
        let sql = format!(
            r#"
            SELECT a.*, {EMPLOYEE_COLUMNS}
            FROM attendances a
            LEFT JOIN employees e ON e.id = a.employee_id
            WHERE a.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Attendance>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Attendance>, AppError> {
        let row = sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, input: &NewAttendance) -> Result<Attendance, AppError> {
        let row = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO attendances (employee_id, date, check_in_time, check_out_time, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(input.check_in_time)
        .bind(input.check_out_time)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, input: &NewAttendance) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(
            r#"
            UPDATE attendances SET
                employee_id = $1, date = $2, check_in_time = $3, check_out_time = $4, status = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(input.check_in_time)
        .bind(input.check_out_time)
        .bind(&input.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM attendances WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
