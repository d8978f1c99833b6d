pub mod attendance_service;
pub mod compliance_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod leave_service;
pub mod payroll_service;
pub mod performance_service;
pub mod training_service;
pub mod user_service;

pub use attendance_service::AttendanceService;
pub use compliance_service::ComplianceService;
pub use dashboard_service::DashboardService;
pub use employee_service::EmployeeService;
pub use leave_service::LeaveService;
pub use payroll_service::PayrollService;
pub use performance_service::PerformanceService;
pub use training_service::TrainingService;
pub use user_service::UserService;
