// State management for the report editor

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::capture::CaptureState;
use crate::database::{DatabaseManager, EditorSettings};
use crate::dictation::DictationSession;
use crate::llm_engine::engine::LlmEngine;
use crate::publish::Publisher;
use crate::report::ReportSession;

/// Wrapper around DatabaseManager for shared access
pub struct DbWrapper {
    inner: Arc<DatabaseManager>,
}

impl DbWrapper {
    pub fn new(db: DatabaseManager) -> Self {
        Self {
            inner: Arc::new(db),
        }
    }

    pub fn inner(&self) -> &DatabaseManager {
        &self.inner
    }
}

impl std::ops::Deref for DbWrapper {
    type Target = DatabaseManager;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct AppState {
    /// Settings store, set once during setup
    database: Arc<RwLock<Option<DbWrapper>>>,
    /// Settings loaded at startup, updated by settings_set
    pub settings: Arc<RwLock<EditorSettings>>,
    /// The report being edited, with its captured media
    pub report: Arc<RwLock<ReportSession>>,
    pub capture: Arc<Mutex<CaptureState>>,
    pub dictation: Arc<Mutex<DictationSession>>,
    pub llm_engine: Arc<RwLock<LlmEngine>>,
    pub publisher: Arc<Publisher>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = EditorSettings::default();

        Self {
            database: Arc::new(RwLock::new(None)),
            report: Arc::new(RwLock::new(ReportSession::new(settings.doctor.clone()))),
            dictation: Arc::new(Mutex::new(DictationSession::new(&settings.dictation_locale))),
            llm_engine: Arc::new(RwLock::new(LlmEngine::from_settings(&settings))),
            settings: Arc::new(RwLock::new(settings)),
            capture: Arc::new(Mutex::new(CaptureState::new())),
            publisher: Arc::new(Publisher::new()),
        }
    }

    /// Store the database and apply the persisted settings
    pub async fn init_database(&self, db: DatabaseManager) -> anyhow::Result<()> {
        let settings = db.load_editor_settings()?;

        {
            let mut guard = self.database.write().await;
            *guard = Some(DbWrapper::new(db));
        }

        self.apply_settings(settings).await;
        Ok(())
    }

    /// Push settings into every session that depends on them
    pub async fn apply_settings(&self, settings: EditorSettings) {
        self.report.write().await.doctor = settings.doctor.clone();
        self.dictation.lock().await.set_locale(&settings.dictation_locale);
        *self.llm_engine.write().await = LlmEngine::from_settings(&settings);
        *self.settings.write().await = settings;
        log::info!("Editor settings applied");
    }

    /// Get the database manager
    pub async fn db(&self) -> Result<impl std::ops::Deref<Target = DatabaseManager> + '_, String> {
        let guard = self.database.read().await;
        tokio::sync::RwLockReadGuard::try_map(guard, |opt| opt.as_ref().map(|db| db.inner()))
            .map_err(|_| "Database not initialized".to_string())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
