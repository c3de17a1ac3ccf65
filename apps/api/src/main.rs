use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cvgen_api::config::Config;
use cvgen_api::cv::{CvRepository, InMemoryCvRepository, PgCvRepository};
use cvgen_api::db::{create_pool, ensure_schema};
use cvgen_api::i18n::{Catalog, Locale};
use cvgen_api::routes::build_router;
use cvgen_api::state::AppState;
use cvgen_api::submission::SubmissionAssembler;
use cvgen_api::wizard::StandardSchema;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cvgen_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV builder API v{}", env!("CARGO_PKG_VERSION"));

    let repo: Arc<dyn CvRepository> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgCvRepository::new(pool))
        }
        None => {
            info!("DATABASE_URL not set; CVs are kept in memory");
            Arc::new(InMemoryCvRepository::new())
        }
    };

    // Server-side messages are in English regardless of the client locale
    let assembler = Arc::new(SubmissionAssembler::new(
        Arc::new(StandardSchema),
        Arc::new(Catalog::new(Locale::En)),
    ));

    let state = AppState {
        repo,
        assembler,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
