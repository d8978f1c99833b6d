// src/services/user_service.rs

use bcrypt::hash;
use validator::ValidationErrors;

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, field_error, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{EmployeeRepository, UserRepository},
    models::user::{
        NewUser, User, UserEditForm, UserForm, DUPLICATE_ACCOUNT_MESSAGE,
        DUPLICATE_USERNAME_MESSAGE,
    },
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    employee_repo: EmployeeRepository,
    hash_cost: u32,
}

impl UserService {
    pub fn new(user_repo: UserRepository, employee_repo: EmployeeRepository, hash_cost: u32) -> Self {
        Self { user_repo, employee_repo, hash_cost }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<User>>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<User>, AppError> {
        self.user_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.user_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Só funcionários sem conta; `owner` (dono atual, na edição) continua na lista.
    pub async fn employee_choices(
        &self,
        owner: Option<i64>,
        selected: Option<i64>,
    ) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices_without_account(owner).await?;
        Ok(employee_choices(&employees, selected))
    }

    // Regras de unicidade checadas antes do INSERT/UPDATE; a constraint do banco
    // continua como última barreira.
    async fn validate(
        &self,
        mut errors: ValidationErrors,
        employee_id: Option<i64>,
        username: Option<&str>,
        current_id: Option<i64>,
    ) -> Result<(), AppError> {
        check_employee_selected(&self.employee_repo, employee_id, &mut errors).await?;

        if let Some(username) = username {
            if self.user_repo.username_exists(username, current_id).await? {
                errors.add("username", field_error("duplicate_username", DUPLICATE_USERNAME_MESSAGE));
            }
        }
        if let Some(employee_id) = employee_id {
            if self.user_repo.employee_has_account(employee_id, current_id).await? {
                errors.add("employee_id", field_error("duplicate_account", DUPLICATE_ACCOUNT_MESSAGE));
            }
        }
        ensure_valid(errors)
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.hash_cost;
        // Executa o hashing em um thread separado
        let hashed = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    pub async fn create(&self, form: &UserForm) -> Result<User, AppError> {
        self.validate(form.check(), form.employee_id, form.username.as_deref(), None)
            .await?;

        let (employee_id, username, password, role) = form.clone().into_parts()?;
        let password_hash = self.hash_password(password).await?;

        let user = self
            .user_repo
            .create(&NewUser { employee_id, username, password_hash, role })
            .await?;
        tracing::info!("🔑 Conta criada: {} (funcionário {})", user.username, user.employee_id);
        Ok(user)
    }

    /// Senha nova em branco mantém o hash atual.
    pub async fn update(&self, id: i64, form: &UserEditForm) -> Result<User, AppError> {
        self.validate(form.check(), form.employee_id, form.username.as_deref(), Some(id))
            .await?;

        let password_hash = match form.new_password.clone() {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };
        let changes = form.clone().into_changes(password_hash)?;

        let user = self.user_repo.update(id, &changes).await?;
        tracing::info!("🔑 Conta atualizada: {}", user.username);
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.user_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.user_repo.delete(id).await?;
        tracing::info!("🗑️ Conta removida: {}", id);
        Ok(())
    }
}
