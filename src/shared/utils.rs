use diesel::{
    r2d2::{ConnectionManager, Pool, PoolError},
    PgConnection,
};
use log::info;
use std::time::Duration;

use crate::shared::config::DatabaseConfig;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub fn create_conn(config: &DatabaseConfig) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build(manager)?;
    info!(
        "Connected to database {} at {}:{}",
        config.database, config.host, config.port
    );
    Ok(pool)
}

/// Builds a pool without opening any connection. Connections are established
/// on first checkout.
pub fn create_lazy_conn(config: &DatabaseConfig) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(config.url());
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build_unchecked(manager)
}

/// Replaces every `|` with `\|` so a value can sit inside a Markdown table cell.
pub fn escape_pipes(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Cuts `value` to at most `max_chars` characters, appending `...` when
/// anything was removed.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &value[..byte_idx]),
        None => value.to_string(),
    }
}

pub fn first_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values
        .iter()
        .copied()
        .find(|v| !v.trim().is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pipes() {
        assert_eq!(escape_pipes("a|b||c"), "a\\|b\\|\\|c");
        assert_eq!(escape_pipes("plain"), "plain");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_chars("abcdefghijk", 10), "abcdefghij...");
        assert_eq!(truncate_chars("ääääää", 3), "äää...");
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&["", "  ", "x", "y"]), "x");
        assert_eq!(first_non_empty(&["", ""]), "");
    }
}
