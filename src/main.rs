use anyhow::Context;
use todo_api::{
    application::todo_service::TodoServiceImpl,
    config::Config,
    domain::repository::TodoRepository,
    http::{routes::todos, routing},
    infrastructure::sqlite_repo::SqliteTodoRepository,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let repo = SqliteTodoRepository::connect(&config.database_url)
        .await
        .context("failed to connect to the todo store")?;
    repo.init().await.context("failed to initialise the todo store")?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
