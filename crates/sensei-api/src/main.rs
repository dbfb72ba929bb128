use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sensei_api::{
    app::build_router,
    config::{Config, StoreBackend},
    state::AppState,
};
use sensei_context::HttpPageFetcher;
use sensei_graph::Orchestrator;
use sensei_llm::ClientFactory;
use sensei_persist::{HistoryStore, InMemoryHistoryStore, MongoHistoryStore};
use sensei_search::create_search_client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting Sensei API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    tracing::info!(
        fast = %config.llm.fast.model,
        capable = %config.llm.capable.model,
        "Initializing completion clients"
    );
    let fast_client =
        ClientFactory::create_chat_client(config.llm.fast.provider(&config.fast_model_api_key))?;
    let capable_client = ClientFactory::create_chat_client(
        config.llm.capable.provider(&config.capable_model_api_key),
    )?;

    let search = create_search_client(&config.search_config())?;
    let search_backend = search.name();

    let turn_config = config.turn_config();
    let pages = Arc::new(HttpPageFetcher::new(turn_config.page_fetch_timeout)?);

    let store: Arc<dyn HistoryStore> = match config.store.backend {
        StoreBackend::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let store =
                MongoHistoryStore::connect(&config.mongodb_uri, &config.mongodb.database).await?;
            tracing::info!("MongoDB connected");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory history store; threads are lost on restart");
            Arc::new(InMemoryHistoryStore::new())
        }
    };

    let orchestrator = Orchestrator::builder()
        .fast_client(fast_client)
        .capable_client(capable_client)
        .search_client(search)
        .page_fetcher(pages)
        .history_store(store)
        .models(config.models())
        .config(turn_config)
        .build()?;

    let state = Arc::new(AppState::new(config.clone(), orchestrator, search_backend));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
