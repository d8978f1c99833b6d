// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{
    db::{
        AttendanceRepository, ComplianceRepository, DashboardRepository, EmployeeRepository,
        LeaveRepository, PayrollRepository, PerformanceRepository, TrainingRepository,
        UserRepository,
    },
    services::{
        AttendanceService, ComplianceService, DashboardService, EmployeeService, LeaveService,
        PayrollService, PerformanceService, TrainingService, UserService,
    },
};

const DEFAULT_DATABASE_URL: &str = "sqlite://ems.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub password_hash_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            Err(_) => 5,
        };

        let password_hash_cost = match env::var("PASSWORD_HASH_COST") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PASSWORD_HASH_COST inválido: {raw}"))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self { database_url, bind_addr, max_connections, password_hash_cost })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub employee_service: EmployeeService,
    pub attendance_service: AttendanceService,
    pub leave_service: LeaveService,
    pub payroll_service: PayrollService,
    pub performance_service: PerformanceService,
    pub training_service: TrainingService,
    pub compliance_service: ComplianceService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .with_context(|| format!("Falha ao conectar em {}", config.database_url))?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config.password_hash_cost))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: SqlitePool, password_hash_cost: u32) -> Self {
        let employee_repo = EmployeeRepository::new(db_pool.clone());

        Self {
            employee_service: EmployeeService::new(employee_repo.clone()),
            attendance_service: AttendanceService::new(
                AttendanceRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            leave_service: LeaveService::new(
                LeaveRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            payroll_service: PayrollService::new(
                PayrollRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            performance_service: PerformanceService::new(
                PerformanceRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            training_service: TrainingService::new(
                TrainingRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            compliance_service: ComplianceService::new(
                ComplianceRepository::new(db_pool.clone()),
                employee_repo.clone(),
            ),
            user_service: UserService::new(
                UserRepository::new(db_pool.clone()),
                employee_repo,
                password_hash_cost,
            ),
            dashboard_service: DashboardService::new(DashboardRepository::new(db_pool.clone())),
            db_pool,
        }
    }
}
