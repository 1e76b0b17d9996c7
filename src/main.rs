use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use blog_summariser::{
    config::Config,
    api::routes::create_router,
    pipeline::Pipeline,
    scraper::HttpExtractor,
    store::SqliteStore,
    translator::{TranslationTable, Translator},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let table = match &config.translation_table_path {
        Some(path) => TranslationTable::with_overrides_from_file(path)?,
        None => TranslationTable::built_in(),
    };
    info!(entries = table.len(), "Translation table ready");

    let store = SqliteStore::open(&config.database_path)?;
    let extractor = HttpExtractor::new(config.extract_timeout)?;
    let pipeline = Pipeline::new(
        Arc::new(store),
        Arc::new(extractor),
        Translator::new(Arc::new(table)),
    )
    .with_extract_timeout(config.extract_timeout);

    // Create application state
    let app_state = AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
    };

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
