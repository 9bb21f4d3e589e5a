use crate::shared::config::AppConfig;
use crate::shared::utils::DbPool;

/// Process-wide state shared by every handler. Read-only after startup; the
/// server takes its listen port from `config`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub conn: DbPool,
}

impl AppState {
    pub fn new(config: AppConfig, conn: DbPool) -> Self {
        Self { config, conn }
    }
}
