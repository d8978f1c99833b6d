// src/db/payroll_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, map_unique_violation, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::payroll::{NewPayroll, Payroll, DUPLICATE_PERIOD_MESSAGE},
};

#[derive(Clone)]
pub struct PayrollRepository {
    pool: SqlitePool,
}

impl PayrollRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<WithEmployee<Payroll>>, AppError> {
        let sql = format!(
            r#"
            SELECT p.*, {EMPLOYEE_COLUMNS}
            FROM payrolls p
            LEFT JOIN employees e ON e.id = p.employee_id
            ORDER BY p.year DESC, p.month DESC, e.last_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<Payroll>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<WithEmployee<Payroll>>, AppError> {
        let sql = format!(
            r#"
            SELECT p.*, {EMPLOYEE_COLUMNS}
            FROM payrolls p
            LEFT JOIN employees e ON e.id = p.employee_id
            WHERE p.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<Payroll>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Payroll>, AppError> {
        let row = sqlx::query_as::<_, Payroll>("SELECT * FROM payrolls WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Já existe folha para (funcionário, mês, ano)? `exclude_id` ignora o próprio registro na edição.
    pub async fn period_exists(
        &self,
        employee_id: i64,
        month: i32,
        year: i32,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM payrolls
                WHERE employee_id = $1 AND month = $2 AND year = $3
                  AND ($4 IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // O líquido é sempre recalculado aqui, nunca vem do formulário.
    pub async fn create(&self, input: &NewPayroll) -> Result<Payroll, AppError> {
        sqlx::query_as::<_, Payroll>(
            r#"
            INSERT INTO payrolls (employee_id, month, year, salary, bonus, deductions, net_pay)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.month)
        .bind(input.year)
        .bind(input.salary.to_string())
        .bind(input.bonus.to_string())
        .bind(input.deductions.to_string())
        .bind(input.net_pay()?.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_PERIOD_MESSAGE))
    }

    pub async fn update(&self, id: i64, input: &NewPayroll) -> Result<Payroll, AppError> {
        sqlx::query_as::<_, Payroll>(
            r#"
            UPDATE payrolls SET
                employee_id = $1, month = $2, year = $3,
                salary = $4, bonus = $5, deductions = $6, net_pay = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(input.month)
        .bind(input.year)
        .bind(input.salary.to_string())
        .bind(input.bonus.to_string())
        .bind(input.deductions.to_string())
        .bind(input.net_pay()?.to_string())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_PERIOD_MESSAGE))?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM payrolls WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payrolls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
