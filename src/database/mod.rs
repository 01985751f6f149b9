// Database module for the report editor
// Provides SQLite persistence for editor settings (doctor profile, preferences)

pub mod manager;
pub mod migrations;
pub mod models;
pub mod settings_repo;

pub use manager::DatabaseManager;
pub use models::*;
