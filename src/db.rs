pub mod schema;
pub use schema::ensure_created;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod leave_repo;
pub use leave_repo::LeaveRepository;
pub mod payroll_repo;
pub use payroll_repo::PayrollRepository;
pub mod performance_repo;
pub use performance_repo::PerformanceRepository;
pub mod training_repo;
pub use training_repo::TrainingRepository;
pub mod compliance_repo;
pub use compliance_repo::ComplianceRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
