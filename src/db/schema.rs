// src/db/schema.rs

use sqlx::SqlitePool;

const SCHEMA: &str = include_str!("schema.sql");

/// Cria as tabelas que ainda não existem. Idempotente; roda a cada inicialização.
pub async fn ensure_created(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("✅ Esquema do banco de dados verificado.");
    Ok(())
}
