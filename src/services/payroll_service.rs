// src/services/payroll_service.rs

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, field_error, AppError, FORM_LEVEL},
        view::{employee_choices, SelectOption},
    },
    db::{EmployeeRepository, PayrollRepository},
    models::payroll::{Payroll, PayrollForm, DUPLICATE_PERIOD_MESSAGE},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct PayrollService {
    payroll_repo: PayrollRepository,
    employee_repo: EmployeeRepository,
}

impl PayrollService {
    pub fn new(payroll_repo: PayrollRepository, employee_repo: EmployeeRepository) -> Self {
        Self { payroll_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Payroll>>, AppError> {
        self.payroll_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Payroll>, AppError> {
        self.payroll_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Payroll, AppError> {
        self.payroll_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    // Um único holerite por (funcionário, mês, ano); na edição o próprio registro não conta.
    async fn validate(&self, form: &PayrollForm, current_id: Option<i64>) -> Result<(), AppError> {
        let mut errors = form.check();
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;

        if let Some((employee_id, month, year)) = form.period() {
            if self.payroll_repo.period_exists(employee_id, month, year, current_id).await? {
                errors.add(FORM_LEVEL, field_error("duplicate_period", DUPLICATE_PERIOD_MESSAGE));
            }
        }
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &PayrollForm) -> Result<Payroll, AppError> {
        self.validate(form, None).await?;
        let payroll = self.payroll_repo.create(&form.clone().into_new()?).await?;
        tracing::info!(
            "💰 Folha criada: {} ({:02}/{}) líquido {}",
            payroll.id,
            payroll.month,
            payroll.year,
            payroll.net_pay
        );
        Ok(payroll)
    }

    pub async fn update(&self, id: i64, form: &PayrollForm) -> Result<Payroll, AppError> {
        self.validate(form, Some(id)).await?;
        let payroll = self.payroll_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("💰 Folha atualizada: {} líquido {}", payroll.id, payroll.net_pay);
        Ok(payroll)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.payroll_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.payroll_repo.delete(id).await?;
        tracing::info!("🗑️ Folha removida: {}", id);
        Ok(())
    }
}
