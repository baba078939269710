use std::fmt;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::AppArgs;
use crate::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub mailer: Mailer,
    pub config: AppArgs,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db_pool", &self.db_pool)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}
