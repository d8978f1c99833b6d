// src/services/training_service.rs

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{EmployeeRepository, TrainingRepository},
    models::training::{Training, TrainingForm},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct TrainingService {
    training_repo: TrainingRepository,
    employee_repo: EmployeeRepository,
}

impl TrainingService {
    pub fn new(training_repo: TrainingRepository, employee_repo: EmployeeRepository) -> Self {
        Self { training_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Training>>, AppError> {
        self.training_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Training>, AppError> {
        self.training_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Training, AppError> {
        self.training_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    async fn validate(&self, form: &TrainingForm) -> Result<(), AppError> {
        let mut errors = form.check();
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &TrainingForm) -> Result<Training, AppError> {
        self.validate(form).await?;
        let training = self.training_repo.create(&form.clone().into_new()?).await?;
        tracing::info!("🎓 Treinamento criado: {} - {}", training.id, training.training_name);
        Ok(training)
    }

    pub async fn update(&self, id: i64, form: &TrainingForm) -> Result<Training, AppError> {
        self.validate(form).await?;
        let training = self.training_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("🎓 Treinamento atualizado: {}", training.id);
        Ok(training)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.training_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.training_repo.delete(id).await?;
        tracing::info!("🗑️ Treinamento removido: {}", id);
        Ok(())
    }
}
