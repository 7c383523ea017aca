use backend::{router, AppState, Config, JsonStore, TodoService};
use frontend::Views;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing(&config.log_level);

    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set, using the development default");
    }

    let service = TodoService::new(JsonStore::new(config.data_file.clone()));
    let views = Views::new()?;
    let app = router(AppState::new(service, views));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        data_file = %config.data_file.display(),
        "todo server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=debug")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
