// src/services/compliance_service.rs

use chrono::Local;

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{ComplianceRepository, EmployeeRepository},
    models::compliance::{Compliance, ComplianceForm},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct ComplianceService {
    compliance_repo: ComplianceRepository,
    employee_repo: EmployeeRepository,
}

impl ComplianceService {
    pub fn new(compliance_repo: ComplianceRepository, employee_repo: EmployeeRepository) -> Self {
        Self { compliance_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Compliance>>, AppError> {
        self.compliance_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Compliance>, AppError> {
        self.compliance_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Compliance, AppError> {
        self.compliance_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    async fn validate(&self, form: &ComplianceForm) -> Result<(), AppError> {
        let mut errors = form.check(Local::now().date_naive());
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &ComplianceForm) -> Result<Compliance, AppError> {
        self.validate(form).await?;
        let record = self.compliance_repo.create(&form.clone().into_new()?).await?;
        tracing::info!("📋 Conformidade registrada: {} - {}", record.id, record.policy);
        Ok(record)
    }

    pub async fn update(&self, id: i64, form: &ComplianceForm) -> Result<Compliance, AppError> {
        self.validate(form).await?;
        let record = self.compliance_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("📋 Conformidade atualizada: {}", record.id);
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.compliance_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.compliance_repo.delete(id).await?;
        tracing::info!("🗑️ Conformidade removida: {}", id);
        Ok(())
    }
}
