use afrijobs_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::cors,
    routes, AppState,
};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let app = Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health))
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/types", get(routes::jobs::list_job_types))
        .route("/api/jobs/tags", get(routes::jobs::list_job_tags))
        .route("/api/jobs/towns", get(routes::jobs::list_towns))
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .fallback(routes::not_found)
        .with_state(app_state)
        .layer(cors::cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
