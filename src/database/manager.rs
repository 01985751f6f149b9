// Database Manager for the report editor
// Owns the settings connection; repositories are `impl DatabaseManager` blocks

use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tauri::Manager;

use super::migrations;

const DB_FILE_NAME: &str = "editor.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DatabaseManager {
    conn: Mutex<Connection>,
    /// None for in-memory databases
    db_path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        let manager = Self::from_connection(conn, Some(db_path))?;

        log::info!("Settings database ready at {:?}", manager.db_path);
        Ok(manager)
    }

    /// Throwaway database, nothing is written to disk
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set busy timeout")?;
        migrations::run_migrations(&conn)
            .context("Failed to run database migrations")?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// `<app data>/editor.db`
    pub fn init_with_app_handle<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> Result<Self> {
        let app_data_dir = app.path()
            .app_data_dir()
            .context("Failed to get app data directory")?;

        Self::new(app_data_dir.join(DB_FILE_NAME))
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock database connection: {}", e))?;
        f(&conn)
    }

    /// Run `f` inside a transaction; it is committed only when `f` succeeds
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.conn.lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock database connection: {}", e))?;
        let tx = conn.transaction().context("Failed to begin transaction")?;
        let value = f(&tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}
