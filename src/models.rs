pub mod attendance;
pub mod compliance;
pub mod dashboard;
pub mod employee;
pub mod leave;
pub mod payroll;
pub mod performance;
pub mod training;
pub mod user;
