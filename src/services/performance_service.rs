// src/services/performance_service.rs

use chrono::Local;

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{EmployeeRepository, PerformanceRepository},
    models::performance::{Performance, PerformanceForm},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct PerformanceService {
    performance_repo: PerformanceRepository,
    employee_repo: EmployeeRepository,
}

impl PerformanceService {
    pub fn new(performance_repo: PerformanceRepository, employee_repo: EmployeeRepository) -> Self {
        Self { performance_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Performance>>, AppError> {
        self.performance_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Performance>, AppError> {
        self.performance_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Performance, AppError> {
        self.performance_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    async fn validate(&self, form: &PerformanceForm) -> Result<(), AppError> {
        let today = Local::now().date_naive();
        let mut errors = form.check(today);
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &PerformanceForm) -> Result<Performance, AppError> {
        self.validate(form).await?;
        let review = self.performance_repo.create(&form.clone().into_new()?).await?;
        tracing::info!("⭐ Avaliação criada: {} (nota {})", review.id, review.score);
        Ok(review)
    }

    pub async fn update(&self, id: i64, form: &PerformanceForm) -> Result<Performance, AppError> {
        self.validate(form).await?;
        let review = self.performance_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("⭐ Avaliação atualizada: {}", review.id);
        Ok(review)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.performance_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.performance_repo.delete(id).await?;
        tracing::info!("🗑️ Avaliação removida: {}", id);
        Ok(())
    }
}
