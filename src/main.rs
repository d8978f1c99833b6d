//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ems_backend::{
    config::{AppState, Config},
    db, router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG sobrescreve o nível padrão)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Cria as tabelas que faltarem (não há histórico de migrações)
    db::ensure_created(&app_state.db_pool).await?;

    let app = router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
