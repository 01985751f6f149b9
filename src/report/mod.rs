// Report editing: doctor/patient/exam data and the per-type templates

pub mod commands;
pub mod session;
pub mod templates;
pub mod types;

pub use session::ReportSession;
pub use templates::{exam_template, ExamTemplate};
pub use types::{
    DoctorInfo, ExamData, ExamFieldsUpdate, ExamType, ExamTypeOption, PatientInfo,
    PatientUpdate, Sex,
};
