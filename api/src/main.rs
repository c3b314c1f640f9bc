use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use diesel_async::{
    AsyncPgConnection,
    pooled_connection::{AsyncDieselConnectionManager, deadpool::Pool},
};
use dotenv::dotenv;
use mimalloc::MiMalloc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod identity;
mod json;
mod schema;
mod thread;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Clone)]
pub struct App {
    pub diesel: Pool<AsyncPgConnection>,
    pub config: Arc<config::ServerConfig>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .init();

    let config = config::ServerConfig::new_from_env();

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
    let pool = Pool::builder(manager)
        .max_size(10)
        .build()
        .expect("couldn't build the database pool");

    let app = App {
        diesel: pool,
        config: Arc::new(config),
    };

    let router = Router::new()
        .nest("/auth", identity::routes::route())
        .merge(thread::routes::route())
        .layer(TraceLayer::new_for_http())
        // Cookie auth needs credentialed CORS, so the origin is mirrored
        // instead of a wildcard.
        .layer(CorsLayer::very_permissive())
        .with_state(app);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("couldn't bind the listen address");

    axum::serve(listener, router).await.unwrap();
}
