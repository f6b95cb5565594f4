use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    db,
    memory::MemoryStore,
    notes::repo::{NoteRepo, PgNoteRepo},
    users::repo::{PgUserRepo, UserRepo},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub notes: Arc<dyn NoteRepo>,
}

impl AppState {
    /// Connects to Postgres when `DATABASE_URL` is set, otherwise keeps data in memory.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        match config.database_url.clone() {
            Some(url) => {
                let pool = db::connect(&url, config.max_connections).await?;
                db::migrate(&pool).await?;
                info!("using postgres store");
                Ok(Self::from_parts(
                    config,
                    Arc::new(PgUserRepo::new(pool.clone())),
                    Arc::new(PgNoteRepo::new(pool)),
                ))
            }
            None => {
                warn!("DATABASE_URL not set; data is kept in memory and lost on restart");
                Ok(Self::in_memory(config))
            }
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::from_parts(config, store.clone(), store)
    }

    pub fn from_parts(
        config: AppConfig,
        users: Arc<dyn UserRepo>,
        notes: Arc<dyn NoteRepo>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            users,
            notes,
        }
    }
}
