// src/services/attendance_service.rs

use crate::{
    common::{
        db_utils::WithEmployee,
        error::{ensure_valid, AppError},
        view::{employee_choices, SelectOption},
    },
    db::{AttendanceRepository, EmployeeRepository},
    models::attendance::{Attendance, AttendanceForm},
    services::employee_service::check_employee_selected,
};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
    employee_repo: EmployeeRepository,
}

impl AttendanceService {
    pub fn new(attendance_repo: AttendanceRepository, employee_repo: EmployeeRepository) -> Self {
        Self { attendance_repo, employee_repo }
    }

    pub async fn list(&self) -> Result<Vec<WithEmployee<Attendance>>, AppError> {
        self.attendance_repo.list_all().await
    }

    pub async fn get_detail(&self, id: i64) -> Result<WithEmployee<Attendance>, AppError> {
        self.attendance_repo.find_detail_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn get(&self, id: i64) -> Result<Attendance, AppError> {
        self.attendance_repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn employee_choices(&self, selected: Option<i64>) -> Result<Vec<SelectOption>, AppError> {
        let employees = self.employee_repo.list_choices().await?;
        Ok(employee_choices(&employees, selected))
    }

    // Regras do formulário + existência do funcionário
    async fn validate(&self, form: &AttendanceForm) -> Result<(), AppError> {
        let mut errors = form.check();
        check_employee_selected(&self.employee_repo, form.employee_id, &mut errors).await?;
        ensure_valid(errors)
    }

    pub async fn create(&self, form: &AttendanceForm) -> Result<Attendance, AppError> {
        self.validate(form).await?;
        let attendance = self.attendance_repo.create(&form.clone().into_new()?).await?;
        tracing::info!(
            "🕘 Presença registrada: {} (funcionário {})",
            attendance.id,
            attendance.employee_id
        );
        Ok(attendance)
    }

    pub async fn update(&self, id: i64, form: &AttendanceForm) -> Result<Attendance, AppError> {
        self.validate(form).await?;
        let attendance = self.attendance_repo.update(id, &form.clone().into_new()?).await?;
        tracing::info!("🕘 Presença atualizada: {}", attendance.id);
        Ok(attendance)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.attendance_repo.exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.attendance_repo.delete(id).await?;
        tracing::info!("🗑️ Presença removida: {}", id);
        Ok(())
    }
}
