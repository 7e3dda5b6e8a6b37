use sqlx::PgPool;

use crate::config;
use crate::db::PgScheduleStore;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub schedule: PgScheduleStore,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config) -> Self {
        let schedule = PgScheduleStore::new(db.clone());
        Self { db, env, schedule }
    }
}
