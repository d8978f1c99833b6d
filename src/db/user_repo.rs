// src/db/user_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::{
        db_utils::{ensure_affected, WithEmployee, EMPLOYEE_COLUMNS},
        error::AppError,
    },
    models::user::{NewUser, User, UserChanges, DUPLICATE_ACCOUNT_MESSAGE, DUPLICATE_USERNAME_MESSAGE},
};

// O repositório de contas, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

// O SQLite não expõe o nome da constraint; a coluna aparece na mensagem
// ("UNIQUE constraint failed: users.username").
fn map_user_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            return if message.contains("users.username") {
                AppError::UniqueConstraintViolation(DUPLICATE_USERNAME_MESSAGE.to_string())
            } else if message.contains("users.employee_id") {
                AppError::UniqueConstraintViolation(DUPLICATE_ACCOUNT_MESSAGE.to_string())
            } else {
                AppError::UniqueConstraintViolation(message.to_string())
            };
        }
    }
    e.into()
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Contas ordenadas pelo nome do funcionário
    pub async fn list_all(&self) -> Result<Vec<WithEmployee<User>>, AppError> {
        let sql = format!(
            r#"
            SELECT u.*, {EMPLOYEE_COLUMNS}
            FROM users u
            LEFT JOIN employees e ON e.id = u.employee_id
            ORDER BY e.last_name ASC, e.first_name ASC
            "#
        );
        let rows = sqlx::query_as::<_, WithEmployee<User>>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_detail_by_id(&self, id: i64) -> Result<Option<WithEmployee<User>>, AppError> {
        let sql = format!(
            r#"
            SELECT u.*, {EMPLOYEE_COLUMNS}
            FROM users u
            LEFT JOIN employees e ON e.id = u.employee_id
            WHERE u.id = $1
            "#
        );
        let row = sqlx::query_as::<_, WithEmployee<User>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    // Busca uma conta pelo seu ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn username_exists(
        &self,
        username: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND ($2 IS NULL OR id <> $2))",
        )
        .bind(username)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn employee_has_account(
        &self,
        employee_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE employee_id = $1 AND ($2 IS NULL OR id <> $2))",
        )
        .bind(employee_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // Cria uma nova conta; a senha já chega hasheada.
    pub async fn create(&self, input: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (employee_id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(&input.role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_unique_violation)
    }

    /// Sem hash novo, a senha atual é mantida.
    pub async fn update(&self, id: i64, input: &UserChanges) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                employee_id = $1,
                username = $2,
                password_hash = COALESCE($3, password_hash),
                role = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(input.employee_id)
        .bind(&input.username)
        .bind(input.password_hash.as_deref())
        .bind(&input.role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_unique_violation)?
        .ok_or(AppError::NotFound)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        ensure_affected(result.rows_affected())
    }
}
