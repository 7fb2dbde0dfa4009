use crate::config::Config;
use crate::error::{AppResult, Error};
use crate::handlers::{
    create_event, delete_event, get_calendars, get_energy_levels, get_events,
    get_recommendations, not_found_handler, record_energy_level, update_event,
};
use crate::middleware::cors_middleware;
use crate::shutdown;
use axum::{
    routing::{get, put},
    Router,
};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the server configuration
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the application router
pub fn router() -> Router {
    Router::new()
        // Calendar endpoints
        .route("/api/calendars", get(get_calendars))
        .route("/api/events", get(get_events).post(create_event))
        .route("/api/events/{id}", put(update_event).delete(delete_event))
        // Energy tracking endpoints
        .route(
            "/api/energy",
            get(get_energy_levels).post(record_energy_level),
        )
        .route("/api/energy/recommendations", get(get_recommendations))
        .method_not_allowed_fallback(not_found_handler)
        .fallback(not_found_handler)
        .layer(axum::middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Bind the listener and serve until a shutdown signal arrives
pub async fn serve(config: Config) -> AppResult<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;
    info!("Listening on {}", addr);

    run(listener, shutdown::shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn run<F>(listener: TcpListener, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down");
    Ok(())
}
