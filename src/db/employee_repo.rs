// src/db/employee_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, EmployeeRef},
        error::AppError,
    },
    models::employee::{Employee, NewEmployee},
};

// O repositório de funcionários, responsável pela tabela 'employees'
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

// Projeção usada no dropdown (tipo "SelectList")
#[derive(sqlx::FromRow)]
struct EmployeeRefRow {
    id: i64,
    first_name: String,
    last_name: String,
    department: Option<String>,
}

impl From<EmployeeRefRow> for EmployeeRef {
    fn from(r: EmployeeRefRow) -> Self {
        Self { id: r.id, first_name: r.first_name, last_name: r.last_name, department: r.department }
    }
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY last_name ASC, first_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    /// Todos os funcionários, para o dropdown.
    pub async fn list_choices(&self) -> Result<Vec<EmployeeRef>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeRefRow>(
            r#"
            SELECT id, first_name, last_name, department
            FROM employees
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Funcionários sem conta de usuário; `keep` mantém o dono atual na edição.
    pub async fn list_choices_without_account(
        &self,
        keep: Option<i64>,
    ) -> Result<Vec<EmployeeRef>, AppError> {
        let rows = sqlx::query_as::<_, EmployeeRefRow>(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.department
            FROM employees e
            WHERE e.id NOT IN (SELECT u.employee_id FROM users u)
               OR e.id = $1
            ORDER BY e.last_name ASC, e.first_name ASC
            "#,
        )
        .bind(keep)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, input: &NewEmployee) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                first_name, last_name, email, phone, department, position, hire_date, salary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.department)
        .bind(&input.position)
        .bind(input.hire_date)
        .bind(input.salary.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(employee)
    }

    /// Atualização do registro inteiro. Nenhuma linha afetada = registro sumiu.
    pub async fn update(&self, id: i64, input: &NewEmployee) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                first_name = $1, last_name = $2, email = $3, phone = $4,
                department = $5, position = $6, hire_date = $7, salary = $8
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.department)
        .bind(&input.position)
        .bind(input.hire_date)
        .bind(input.salary.to_string())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
