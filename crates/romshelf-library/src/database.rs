//! Preference store using SQLite

use crate::LibraryError;
use crate::preferences::{PreferenceStore, decode_legacy, encode_legacy};
use rusqlite::{Connection, params};
use std::path::Path;

/// Ordered lists kept as one row per entry
pub struct SqlitePreferenceStore {
    conn: Connection,
}

impl SqlitePreferenceStore {
    /// Open or create a store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;

        tracing::debug!("Opened preference store at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, LibraryError> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), LibraryError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS category_entries (
                category TEXT NOT NULL,
                position INTEGER NOT NULL,
                rom_path TEXT NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (category, position)
            );

            CREATE INDEX IF NOT EXISTS idx_category_entries_rom
                ON category_entries(category, rom_path);
        "#,
        )?;

        Ok(())
    }

    /// Number of entries stored under a key
    pub fn entry_count(&self, key: &str) -> Result<i64, LibraryError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM category_entries WHERE category = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Replace a list with the contents of an old semicolon-joined string
    pub fn import_legacy(&mut self, key: &str, raw: &str) -> Result<usize, LibraryError> {
        let entries = decode_legacy(raw);
        self.save_list(key, &entries)?;

        tracing::info!("Imported {} legacy entries into {}", entries.len(), key);
        Ok(entries.len())
    }

    /// Render a list in the old semicolon-joined format
    pub fn export_legacy(&self, key: &str) -> Result<String, LibraryError> {
        encode_legacy(&self.load_list(key)?)
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn load_list(&self, key: &str) -> Result<Vec<String>, LibraryError> {
        let mut stmt = self.conn.prepare(
            "SELECT rom_path FROM category_entries WHERE category = ?1 ORDER BY position",
        )?;

        let entries = stmt
            .query_map(params![key], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(entries)
    }

    fn save_list(&mut self, key: &str, entries: &[String]) -> Result<(), LibraryError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM category_entries WHERE category = ?1",
            params![key],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO category_entries (category, position, rom_path) VALUES (?1, ?2, ?3)",
            )?;
            for (position, rom) in entries.iter().enumerate() {
                stmt.execute(params![key, position as i64, rom])?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
