// Report session - the single report being edited
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::templates::exam_template;
use super::types::{DoctorInfo, ExamData, ExamFieldsUpdate, ExamType, PatientInfo, PatientUpdate};
use crate::media::{file_io, MediaLibrary};
use crate::publish::VideoLink;

#[derive(Debug, Clone, Serialize)]
pub struct ReportSession {
    pub doctor: DoctorInfo,
    pub patient: PatientInfo,
    pub exam: ExamData,
    pub media: MediaLibrary,
    pub video_link: Option<VideoLink>,
    #[serde(skip)]
    exam_folder: Option<PathBuf>,
}

impl ReportSession {
    pub fn new(doctor: DoctorInfo) -> Self {
        let exam_type = ExamType::default();
        Self {
            doctor,
            patient: PatientInfo::new(),
            exam: exam_template(exam_type).to_exam_data(exam_type),
            media: MediaLibrary::new(),
            video_link: None,
            exam_folder: None,
        }
    }

    /// Switch exam type, replacing all four text fields with the template.
    /// Edits made to the previous type are discarded.
    pub fn select_exam_type(&mut self, exam_type: ExamType) {
        self.exam = exam_template(exam_type).to_exam_data(exam_type);
        log::info!("Exam type selected: {}", exam_type.label());
    }

    pub fn update_patient(&mut self, update: PatientUpdate) {
        if let Some(name) = update.name {
            self.patient.name = name;
        }
        if let Some(age) = update.age {
            self.patient.age = age;
        }
        if let Some(sex) = update.sex {
            self.patient.sex = sex;
        }
        if let Some(date) = update.date {
            self.patient.date = date;
        }
    }

    pub fn update_exam_fields(&mut self, update: ExamFieldsUpdate) {
        if let Some(equipment) = update.equipment {
            self.exam.equipment = equipment;
        }
        if let Some(preparation) = update.preparation {
            self.exam.preparation = preparation;
        }
        if let Some(findings) = update.findings {
            self.exam.findings = findings;
        }
        if let Some(conclusion) = update.conclusion {
            self.exam.conclusion = conclusion;
        }
    }

    /// Combined "Equipamento e Técnica" text
    pub fn technique_text(&self) -> String {
        format!("{} {}", self.exam.equipment, self.exam.preparation)
    }

    /// Folder for this exam's media, created under `base` on first use
    pub fn ensure_exam_folder(&mut self, base: &Path) -> Result<PathBuf> {
        if let Some(folder) = &self.exam_folder {
            if folder.is_dir() {
                return Ok(folder.clone());
            }
        }
        let folder = file_io::create_exam_folder(base, &self.patient.name)?;
        self.exam_folder = Some(folder.clone());
        Ok(folder)
    }

    pub fn exam_folder(&self) -> Option<&Path> {
        self.exam_folder.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::Sex;
    use tempfile::tempdir;

    #[test]
    fn test_new_session_defaults() {
        let session = ReportSession::new(DoctorInfo::default());

        assert_eq!(session.exam.exam_type, ExamType::Nasossinusal);
        assert_eq!(
            session.exam.conclusion,
            "Exame dentro dos padrões de normalidade."
        );
        assert_eq!(session.patient.sex, Sex::Masculino);
        assert!(session.patient.name.is_empty());
        assert!(session.media.is_empty());
        assert!(session.video_link.is_none());
    }

    #[test]
    fn test_select_exam_type_discards_edits() {
        let mut session = ReportSession::new(DoctorInfo::default());
        session.update_exam_fields(ExamFieldsUpdate {
            findings: Some("edited".to_string()),
            ..Default::default()
        });

        session.select_exam_type(ExamType::Degluticao);

        let expected = exam_template(ExamType::Degluticao);
        assert_eq!(session.exam.exam_type, ExamType::Degluticao);
        assert_eq!(session.exam.findings, expected.findings);
        assert_eq!(session.exam.equipment, expected.equipment);
        assert_eq!(session.exam.preparation, expected.preparation);
        assert_eq!(session.exam.conclusion, expected.conclusion);
    }

    #[test]
    fn test_reselecting_same_type_resets_fields() {
        let mut session = ReportSession::new(DoctorInfo::default());
        session.update_exam_fields(ExamFieldsUpdate {
            conclusion: Some("custom".to_string()),
            ..Default::default()
        });

        session.select_exam_type(ExamType::Nasossinusal);
        assert_eq!(session.exam.conclusion, "Exame dentro dos padrões de normalidade.");
    }

    #[test]
    fn test_partial_updates() {
        let mut session = ReportSession::new(DoctorInfo::default());
        let original_date = session.patient.date.clone();

        session.update_patient(PatientUpdate {
            name: Some("Carlos Lima".to_string()),
            sex: Some(Sex::Outro),
            ..Default::default()
        });
        assert_eq!(session.patient.name, "Carlos Lima");
        assert_eq!(session.patient.sex, Sex::Outro);
        assert_eq!(session.patient.date, original_date);
        assert!(session.patient.age.is_empty());

        let findings = session.exam.findings.clone();
        session.update_exam_fields(ExamFieldsUpdate {
            equipment: Some("Endoscópio 2.7mm".to_string()),
            ..Default::default()
        });
        assert_eq!(session.exam.equipment, "Endoscópio 2.7mm");
        assert_eq!(session.exam.findings, findings);
    }

    #[test]
    fn test_technique_text() {
        let mut session = ReportSession::new(DoctorInfo::default());
        session.select_exam_type(ExamType::VeuPalatino);
        assert_eq!(
            session.technique_text(),
            "Nasofibroscópio flexível. Sem vasoconstritor."
        );
    }

    #[test]
    fn test_exam_folder_created_once() {
        let dir = tempdir().unwrap();
        let mut session = ReportSession::new(DoctorInfo::default());
        session.update_patient(PatientUpdate {
            name: Some("Beatriz".to_string()),
            ..Default::default()
        });

        let first = session.ensure_exam_folder(dir.path()).unwrap();
        let second = session.ensure_exam_folder(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.exam_folder(), Some(first.as_path()));
    }
}
