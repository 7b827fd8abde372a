use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use reality_api::config::Config;
use reality_api::db::slot::StoreSlot;
use reality_api::db::store::MemoryStore;
use reality_api::models::show::{Participant, Prize, Show};
use reality_api::AppState;

/// Configuration for tests. Nothing here is dialled; the store is in memory.
pub fn test_config() -> Config {
    Config {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        database_name: "reality_show_test".to_string(),
        collection_name: "reality_shows".to_string(),
        connect_timeout: Duration::from_secs(10),
        tls_allow_invalid_certificates: false,
        public_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/public"),
        worker_id: 1,
        port: 0,
    }
}

pub fn participant(id: i64, name: &str, age: Option<i64>, prizes: &[f64]) -> Participant {
    Participant {
        id,
        name: name.to_string(),
        age,
        eliminated: false,
        total_votes: 0,
        prizes: prizes
            .iter()
            .map(|v| Prize::new(*v).with_detail("descricao", format!("Premio {v}")))
            .collect(),
    }
}

/// Two shows from one broadcaster, one from another. "Casa" has no prizes.
pub fn seed_shows() -> Vec<Show> {
    vec![
        Show {
            name: "Ilha".to_string(),
            broadcaster: Some("Canal 5".to_string()),
            audience_points: 30.0,
            participants: vec![
                participant(1, "Ana", Some(25), &[1000.0, 250.0]),
                participant(2, "Bia", Some(40), &[5000.0]),
                participant(3, "Caio", Some(19), &[]),
            ],
        },
        Show {
            name: "Casa".to_string(),
            broadcaster: Some("Rede Sol".to_string()),
            audience_points: 12.5,
            participants: vec![participant(4, "Duda", Some(33), &[])],
        },
        Show {
            name: "Fazenda".to_string(),
            broadcaster: Some("Canal 5".to_string()),
            audience_points: 20.0,
            participants: vec![participant(5, "Edu", Some(50), &[750.0])],
        },
    ]
}

/// Build the full application router over a seeded in-memory store.
pub fn test_app_with(shows: Vec<Show>) -> (Router, AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_shows(shows));
    let state = AppState::new(StoreSlot::ready(store.clone()), test_config());
    let app = reality_api::routes::router(state.clone());
    (app, state, store)
}

pub fn test_app() -> (Router, AppState, Arc<MemoryStore>) {
    test_app_with(seed_shows())
}

/// Router whose database connection has not been established yet.
pub fn disconnected_app() -> (Router, AppState) {
    let state = AppState::new(StoreSlot::empty(), test_config());
    let app = reality_api::routes::router(state.clone());
    (app, state)
}
