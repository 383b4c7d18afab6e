use sqlx::SqlitePool;

/// Shared per-process state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}
