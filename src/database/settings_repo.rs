// Settings repository for the report editor
// Handles CRUD operations for the doctor profile and editor preferences

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use super::models::{EditorSettings, Setting};
use crate::report::DoctorInfo;
use super::DatabaseManager;

impl DatabaseManager {
    /// Get a single setting by key
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            get_setting_impl(conn, key)
        })
    }

    /// Set a single setting
    pub fn set_setting(&self, key: &str, value: &str, value_type: &str) -> Result<()> {
        self.with_connection(|conn| {
            set_setting_impl(conn, key, value, value_type)
        })
    }

    pub fn get_all_settings_list(&self) -> Result<Vec<Setting>> {
        self.with_connection(|conn| {
            get_all_settings_impl(conn)
        })
    }

    /// All rows with secret values masked, safe to hand to the webview
    pub fn get_visible_settings_list(&self) -> Result<Vec<Setting>> {
        Ok(self
            .get_all_settings_list()?
            .into_iter()
            .map(Setting::masked)
            .collect())
    }

    /// Load all settings as a structured object, defaults filled in
    pub fn load_editor_settings(&self) -> Result<EditorSettings> {
        self.with_connection(|conn| {
            load_editor_settings_impl(conn)
        })
    }

    pub fn delete_setting(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            delete_setting_impl(conn, key)
        })
    }

    /// Store the whole doctor profile at once; nothing is written if any key fails
    pub fn save_doctor_profile(&self, doctor: &DoctorInfo) -> Result<()> {
        self.with_transaction(|tx| {
            for (key, value) in doctor_profile_entries(doctor) {
                set_setting_impl(tx, key, value, "string")?;
            }
            Ok(())
        })
    }
}

fn doctor_profile_entries(doctor: &DoctorInfo) -> [(&'static str, &str); 6] {
    [
        ("doctor_name", doctor.name.as_str()),
        ("doctor_crm", doctor.crm.as_str()),
        ("doctor_rqe", doctor.rqe.as_str()),
        ("clinic_name", doctor.clinic_name.as_str()),
        ("clinic_address", doctor.address.as_str()),
        ("clinic_phone", doctor.phone.as_str()),
    ]
}

fn get_setting_impl(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT value FROM settings WHERE key = ?"
    ).context("Failed to prepare get_setting query")?;

    let result = stmt.query_row(params![key], |row| row.get(0));

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get setting"),
    }
}

fn set_setting_impl(conn: &Connection, key: &str, value: &str, value_type: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO settings (key, value, value_type, updated_at)
        VALUES (?1, ?2, ?3, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            value_type = excluded.value_type,
            updated_at = datetime('now')
        "#,
        params![key, value, value_type],
    ).context("Failed to set setting")?;

    Ok(())
}

fn get_all_settings_impl(conn: &Connection) -> Result<Vec<Setting>> {
    let mut stmt = conn.prepare(
        "SELECT key, value, value_type, updated_at FROM settings ORDER BY key"
    ).context("Failed to prepare get_all_settings query")?;

    let settings = stmt.query_map([], |row| {
        Ok(Setting {
            key: row.get(0)?,
            value: row.get(1)?,
            value_type: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }).context("Failed to query settings")?;

    settings.collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to collect settings")
}

fn load_editor_settings_impl(conn: &Connection) -> Result<EditorSettings> {
    let mut settings = EditorSettings::default();

    let mut stmt = conn.prepare(
        "SELECT key, value FROM settings"
    ).context("Failed to prepare load_editor_settings query")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
        ))
    }).context("Failed to query settings")?;

    for row in rows {
        let (key, value) = row.context("Failed to read setting row")?;

        match key.as_str() {
            "doctor_name" => settings.doctor.name = value,
            "doctor_crm" => settings.doctor.crm = value,
            "doctor_rqe" => settings.doctor.rqe = value,
            "clinic_name" => settings.doctor.clinic_name = value,
            "clinic_address" => settings.doctor.address = value,
            "clinic_phone" => settings.doctor.phone = value,
            "dictation_locale" if !value.trim().is_empty() => settings.dictation_locale = value,
            "media_folder" => settings.media_folder = Some(value),
            "llm_model" if !value.trim().is_empty() => settings.llm_model = value,
            "gemini_api_key" if !value.trim().is_empty() => settings.gemini_api_key = Some(value),
            _ => {
                log::debug!("Unknown or empty setting key: {}", key);
            }
        }
    }

    Ok(settings)
}

fn delete_setting_impl(conn: &Connection, key: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM settings WHERE key = ?",
        params![key],
    ).context("Failed to delete setting")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{DEFAULT_DICTATION_LOCALE, DEFAULT_LLM_MODEL};
    use tempfile::{tempdir, TempDir};

    fn create_test_db() -> (TempDir, DatabaseManager) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = DatabaseManager::new(db_path).unwrap();
        (dir, db)
    }

    #[test]
    fn test_set_and_get_setting() {
        let (_dir, db) = create_test_db();

        db.set_setting("test_key", "test_value", "string").unwrap();
        assert_eq!(db.get_setting("test_key").unwrap(), Some("test_value".to_string()));

        db.set_setting("test_key", "other", "string").unwrap();
        assert_eq!(db.get_setting("test_key").unwrap(), Some("other".to_string()));
        assert_eq!(db.get_all_settings_list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_setting() {
        let (_dir, db) = create_test_db();

        db.set_setting("media_folder", "/tmp/exams", "string").unwrap();
        db.delete_setting("media_folder").unwrap();
        assert_eq!(db.get_setting("media_folder").unwrap(), None);
    }

    #[test]
    fn test_load_defaults() {
        let (_dir, db) = create_test_db();

        let settings = db.load_editor_settings().unwrap();
        assert_eq!(settings.doctor.name, "Dr. João Silva");
        assert_eq!(settings.doctor.crm, "12345-SP");
        assert_eq!(settings.dictation_locale, DEFAULT_DICTATION_LOCALE);
        assert_eq!(settings.llm_model, DEFAULT_LLM_MODEL);
        assert!(settings.gemini_api_key.is_none());
        assert!(settings.media_folder.is_none());
    }

    #[test]
    fn test_load_stored_profile() {
        let (_dir, db) = create_test_db();

        db.set_setting("doctor_name", "Dra. Ana Costa", "string").unwrap();
        db.set_setting("clinic_phone", "(21) 5555-0000", "string").unwrap();
        db.set_setting("dictation_locale", "en-US", "string").unwrap();
        db.set_setting("gemini_api_key", "", "string").unwrap();

        let settings = db.load_editor_settings().unwrap();
        assert_eq!(settings.doctor.name, "Dra. Ana Costa");
        assert_eq!(settings.doctor.phone, "(21) 5555-0000");
        assert_eq!(settings.doctor.rqe, "9876");
        assert_eq!(settings.dictation_locale, "en-US");
        assert!(settings.gemini_api_key.is_none());
    }

    #[test]
    fn test_save_doctor_profile() {
        let db = DatabaseManager::open_in_memory().unwrap();
        let doctor = DoctorInfo {
            name: "Dr. Paulo Mendes".to_string(),
            crm: "55555-RJ".to_string(),
            rqe: "1234".to_string(),
            clinic_name: "Centro ORL".to_string(),
            address: "Rua das Flores, 10".to_string(),
            phone: "(21) 4000-0000".to_string(),
        };

        db.save_doctor_profile(&doctor).unwrap();

        assert_eq!(db.load_editor_settings().unwrap().doctor, doctor);
        assert_eq!(db.get_all_settings_list().unwrap().len(), 6);
    }

    #[test]
    fn test_visible_settings_mask_api_key() {
        let (_dir, db) = create_test_db();
        db.set_setting("gemini_api_key", "secret-key-123", "string").unwrap();
        db.set_setting("doctor_name", "Dra. Ana Costa", "string").unwrap();

        let visible = db.get_visible_settings_list().unwrap();
        let json = serde_json::to_string(&visible).unwrap();
        assert!(!json.contains("secret-key-123"));
        assert!(json.contains("Dra. Ana Costa"));

        let key_row = visible.iter().find(|s| s.key == "gemini_api_key").unwrap();
        assert_eq!(key_row.value, "***");

        // Stored value is untouched
        assert_eq!(
            db.get_setting("gemini_api_key").unwrap().as_deref(),
            Some("secret-key-123")
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let (_dir, db) = create_test_db();
        db.set_setting("gemini_api_key", "secret", "string").unwrap();

        let settings = db.load_editor_settings().unwrap();
        assert_eq!(settings.gemini_api_key.as_deref(), Some("secret"));

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("secret"));
    }
}
