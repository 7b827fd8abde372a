use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reality_api::config::Config;
use reality_api::db::slot::StoreSlot;
use reality_api::db::store::ShowStore;
use reality_api::server::{self, ServeOutcome};
use reality_api::AppState;

#[tokio::main]
async fn main() {
    // Load .env file (silently skip if missing, env vars may be set externally)
    if dotenvy::dotenv().is_err() {
        let env_path = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(env_path);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let port = config.port;

    let slot = StoreSlot::empty();
    let state = AppState::new(slot.clone(), config);

    // Requests get 503 until the connection below installs the handle.
    let connect_config = Arc::clone(&state.config);
    let connect = async move {
        reality_api::db::mongo::connect(&connect_config)
            .await
            .map(|store| Arc::new(store) as Arc<dyn ShowStore>)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = reality_api::routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "reality-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    let outcome = server::run(listener, app, slot, connect, ctrl_c())
        .await
        .expect("server error");

    if outcome == ServeOutcome::ConnectionFailed {
        std::process::exit(1);
    }
}

async fn ctrl_c() {
    let _ = tokio::signal::ctrl_c().await;
}
