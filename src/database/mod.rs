pub mod schema;

use crate::error::AppError;
use async_trait::async_trait;
use photo_gallery::{KeyValueStore, PlatformError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Initialisiert die Datenbank mit vollständigem Schema
pub fn init_database(db_path: &Path) -> Result<Connection, AppError> {
    // Sicherstellen dass das Verzeichnis existiert
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    schema::init_schema(&conn)?;

    Ok(conn)
}

fn to_platform_error(e: rusqlite::Error) -> PlatformError {
    PlatformError::Other(format!("Database error: {}", e))
}

/// [`KeyValueStore`] on top of the `key_value_store` table
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        self.conn
            .query_row(
                "SELECT value FROM key_value_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(to_platform_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.conn
            .execute(
                "INSERT INTO key_value_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .map_err(to_platform_error)?;
        log::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}
