// Report types - doctor, patient and exam data
use serde::{Deserialize, Serialize};

/// Endoscopic procedure categories supported by the editor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Nasossinusal,
    Nasofibro,
    LaringoEstrobo,
    VeuPalatino,
    Degluticao,
}

impl ExamType {
    /// Title printed on the report
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::Nasossinusal => "Video-endoscopia Nasossinusal",
            ExamType::Nasofibro => "Video-nasofibrolaringoscopia",
            ExamType::LaringoEstrobo => "Video-laringo-estroboscopia",
            ExamType::VeuPalatino => "Video-endoscopia do Véu Palatino",
            ExamType::Degluticao => "Video-endoscopia da Deglutição (FEES)",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ExamType::Nasossinusal => "nasossinusal",
            ExamType::Nasofibro => "nasofibro",
            ExamType::LaringoEstrobo => "laringo_estrobo",
            ExamType::VeuPalatino => "veu_palatino",
            ExamType::Degluticao => "degluticao",
        }
    }

    pub fn all() -> [ExamType; 5] {
        [
            ExamType::Nasossinusal,
            ExamType::Nasofibro,
            ExamType::LaringoEstrobo,
            ExamType::VeuPalatino,
            ExamType::Degluticao,
        ]
    }

    /// Accepts either the key or the printed label
    pub fn parse(value: &str) -> Option<ExamType> {
        let value = value.trim();
        Self::all()
            .into_iter()
            .find(|t| t.key() == value || t.label() == value)
    }
}

impl Default for ExamType {
    fn default() -> Self {
        ExamType::Nasossinusal
    }
}

/// Exam type entry for the selector
#[derive(Debug, Clone, Serialize)]
pub struct ExamTypeOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<ExamType> for ExamTypeOption {
    fn from(exam_type: ExamType) -> Self {
        Self {
            key: exam_type.key(),
            label: exam_type.label(),
        }
    }
}

/// Doctor and clinic identification printed in the header and signature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorInfo {
    pub name: String,
    pub crm: String,
    pub rqe: String,
    pub clinic_name: String,
    pub address: String,
    pub phone: String,
}

impl Default for DoctorInfo {
    fn default() -> Self {
        Self {
            name: "Dr. João Silva".to_string(),
            crm: "12345-SP".to_string(),
            rqe: "9876".to_string(),
            clinic_name: "Clínica Otorrino Avançada".to_string(),
            address: "Av. Paulista, 1000 - Conj 50 - São Paulo/SP".to_string(),
            phone: "(11) 99999-9999".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    Masculino,
    Feminino,
    Outro,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Masculino => "Masculino",
            Sex::Feminino => "Feminino",
            Sex::Outro => "Outro",
        }
    }
}

impl Default for Sex {
    fn default() -> Self {
        Sex::Masculino
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    pub name: String,
    pub age: String,
    pub sex: Sex,
    pub date: String,
}

impl PatientInfo {
    /// Blank patient dated today (dd/mm/yyyy)
    pub fn new() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            sex: Sex::default(),
            date: chrono::Local::now().format("%d/%m/%Y").to_string(),
        }
    }

    /// First word of the patient name, used in generated links
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial patient update coming from the form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub sex: Option<Sex>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamData {
    pub exam_type: ExamType,
    pub equipment: String,
    pub preparation: String,
    pub findings: String,
    pub conclusion: String,
}

/// Partial exam field update coming from the form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExamFieldsUpdate {
    pub equipment: Option<String>,
    pub preparation: Option<String>,
    pub findings: Option<String>,
    pub conclusion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exam_type() {
        assert_eq!(ExamType::parse("nasofibro"), Some(ExamType::Nasofibro));
        assert_eq!(
            ExamType::parse("Video-endoscopia da Deglutição (FEES)"),
            Some(ExamType::Degluticao)
        );
        assert_eq!(ExamType::parse("unknown"), None);
    }

    #[test]
    fn test_exam_type_serde_key() {
        let json = serde_json::to_string(&ExamType::LaringoEstrobo).unwrap();
        assert_eq!(json, "\"laringo_estrobo\"");
    }

    #[test]
    fn test_first_name() {
        let mut patient = PatientInfo::new();
        assert_eq!(patient.first_name(), "");

        patient.name = "  Maria da Silva".to_string();
        assert_eq!(patient.first_name(), "Maria");
    }

    #[test]
    fn test_patient_date_format() {
        let patient = PatientInfo::new();
        let parts: Vec<&str> = patient.date.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].len(), 4);
    }
}
