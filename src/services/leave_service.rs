// src/services/leave_service.rs

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{EmployeeRepository, LeaveRepository},
    models::leave::{Leave, LeaveForm},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct LeaveService {
    leave_repo: LeaveRepository,
    employee_repo: EmployeeRepository,
}

impl LeaveService {
    pub fn new(leave_repo: LeaveRepository, employee_repo: EmployeeRepository) -> Self {
        Self { leave_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Leave>>, AppError> {
        self.leave_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Leave>, AppError> {
        self.leave_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Leave, AppError> {
        self.leave_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    async fn validate(&self, form: &LeaveForm) -> Result<(), AppError> {
        let mut errors = form.check();
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &LeaveForm) -> Result<Leave, AppError> {
        self.validate(form).await?;
        let leave = self.leave_repo.create(&form.clone().into_new()?).await?;
        tracing::info!("🌴 Licença criada: {} ({} dia(s))", leave.id, leave.total_days());
        Ok(leave)
    }

    pub async fn update(&self, id: i64, form: &LeaveForm) -> Result<Leave, AppError> {
        self.validate(form).await?;
        let leave = self.leave_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("🌴 Licença atualizada: {}", leave.id);
        Ok(leave)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.leave_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.leave_repo.delete(id).await?;
        tracing::info!("🗑️ Licença removida: {}", id);
        Ok(())
    }
}
