use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, Row};

use crate::common::error::AppError;

// ---
// Helpers de mapeamento de linhas
// ---

/// Lê uma coluna TEXT e converte para `Decimal` (o SQLite não tem tipo decimal exato).
pub(crate) fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Converte violação de unicidade em um erro legível; o resto vira DatabaseError.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(message.to_string());
        }
    }
    e.into()
}

/// UPDATE/DELETE que não afetou linhas: o registro sumiu entre a leitura e a escrita.
pub(crate) fn ensure_affected(rows_affected: u64) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

// ---
// Projeção do funcionário usada nas listagens (o "Include" explícito)
// ---

pub(crate) const EMPLOYEE_COLUMNS: &str =
    "e.id AS emp_id, e.first_name AS emp_first_name, e.last_name AS emp_last_name, e.department AS emp_department";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
}

impl EmployeeRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Um registro filho junto com o funcionário ao qual pertence.
#[derive(Debug, Clone, Serialize)]
pub struct WithEmployee<T> {
    #[serde(flatten)]
    pub record: T,
    pub employee: Option<EmployeeRef>,
}

impl<'r, T> FromRow<'r, SqliteRow> for WithEmployee<T>
where
    T: FromRow<'r, SqliteRow>,
{
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let record = T::from_row(row)?;
        let employee = match row.try_get::<Option<i64>, _>("emp_id")? {
            Some(id) => Some(EmployeeRef {
                id,
                first_name: row.try_get("emp_first_name")?,
                last_name: row.try_get("emp_last_name")?,
                department: row.try_get("emp_department")?,
            }),
            None => None,
        };
        Ok(Self { record, employee })
    }
}
