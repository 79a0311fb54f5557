use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use vidstream_config::{CorsConfig, JwtConfig, MediaConfig, ServerConfig};
use vidstream_core::{LocalMediaStore, MediaStore};

use crate::storage::UserStore;
use crate::storage::memory::MemoryStore;
use crate::storage::postgres::PgUserStore;

/// Shared application state. Configuration is loaded once at startup and
/// immutable afterwards; the store and media backends are injected behind
/// trait objects.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub media: Arc<dyn MediaStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    pub media_config: MediaConfig,
}

pub async fn init_app_state() -> AppState {
    let store: Arc<dyn UserStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            Arc::new(PgUserStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory account store");
            Arc::new(MemoryStore::new())
        }
    };

    let media_config = MediaConfig::from_env();
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        media_config.root.clone(),
        media_config.base_url.clone(),
    ));

    AppState {
        store,
        media,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
        media_config,
    }
}
