// src/services/employee_service.rs

use validator::ValidationErrors;

use crate::{
    common::error::{ensure_valid, field_error, AppError},
    db::EmployeeRepository,
    models::employee::{Employee, EmployeeForm},
};

pub(crate) const SELECT_EMPLOYEE_MESSAGE: &str = "Please select an employee.";

/// O funcionário referenciado precisa existir; senão o erro cai no próprio campo.
pub(crate) async fn check_employee_selected(
    employee_repo: &EmployeeRepository,
    employee_id: Option<i64>,
    errors: &mut ValidationErrors,
) -> Result<(), AppError> {
    if let Some(id) = employee_id {
        if !employee_repo.exists(id).await? {
            errors.add("employee_id", field_error("employee_exists", SELECT_EMPLOYEE_MESSAGE));
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(employee_repo: EmployeeRepository) -> Self {
        Self { employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.employee_repo.list_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Employee, AppError> {
        self.employee_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn create(&self, form: &EmployeeForm) -> Result<Employee, AppError> {
        ensure_valid(form.check())?;
        let new_employee = form.clone().into_new()?;
        let employee = self.employee_repo.create(&new_employee).await?;
        tracing::info!("👤 Funcionário criado: {} ({})", employee.full_name(), employee.id);
        Ok(employee)
    }

    pub async fn update(&self, id: i64, form: &EmployeeForm) -> Result<Employee, AppError> {
        ensure_valid(form.check())?;
        let changes = form.clone().into_new()?;
        let employee = self.employee_repo.update(id, &changes).await?;
        tracing::info!("👤 Funcionário atualizado: {}", employee.id);
        Ok(employee)
    }

    /// Remove o funcionário (os registros filhos caem em cascata). Devolve o registro removido.
    pub async fn delete(&self, id: i64) -> Result<Employee, AppError> {
        let employee = self.get(id).await?;
        self.employee_repo.delete(id).await?;
        tracing::info!("🗑️ Funcionário removido: {}", id);
        Ok(employee)
    }
}
