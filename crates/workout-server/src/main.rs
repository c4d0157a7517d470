use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod db;
mod routes;
mod uow;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:workout.db?mode=rwc".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    let database = db::Database::new(&db_url)
        .await
        .expect("failed to initialize database");

    let state = AppState { db: database };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::categorias::router())
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");
    info!("workout API listening on http://localhost:{port}");
    axum::serve(listener, app).await.unwrap();
}
