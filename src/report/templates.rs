//! Canned report text for each exam type

use super::types::{ExamData, ExamType};

/// Default field texts for an exam type
#[derive(Debug, Clone, Copy)]
pub struct ExamTemplate {
    pub equipment: &'static str,
    pub preparation: &'static str,
    pub findings: &'static str,
    pub conclusion: &'static str,
}

impl ExamTemplate {
    pub fn to_exam_data(&self, exam_type: ExamType) -> ExamData {
        ExamData {
            exam_type,
            equipment: self.equipment.to_string(),
            preparation: self.preparation.to_string(),
            findings: self.findings.to_string(),
            conclusion: self.conclusion.to_string(),
        }
    }
}

pub fn exam_template(exam_type: ExamType) -> ExamTemplate {
    match exam_type {
        ExamType::Nasossinusal => ExamTemplate {
            equipment: "Endoscópio rígido 4mm 0 e 30 graus, fonte de luz LED, câmera HD.",
            preparation: "Anestesia tópica com lidocaína spray e vasoconstrição nasal.",
            findings: "Cavidades nasais amplas. Cornetos inferiores e médios eutróficos. Meatos médios livres. Septo nasal centrado. Rinofaringe livre com óstios tubários pérvios.",
            conclusion: "Exame dentro dos padrões de normalidade.",
        },
        ExamType::Nasofibro => ExamTemplate {
            equipment: "Nasofibroscópio flexível 3.2mm, fonte de luz LED.",
            preparation: "Anestesia tópica nasal.",
            findings: "Fossas nasais pérvias. Rinofaringe sem lesões, tonsila faríngea (adenoide) sem hipertrofia obstrutiva. Base de língua sem particularidades. Epiglote de aspecto normal. Pregas vocais móveis, com coaptação glótica completa.",
            conclusion: "Laringoscopia normal.",
        },
        ExamType::LaringoEstrobo => ExamTemplate {
            equipment: "Laringoscópio rígido 70 graus, estroboscópio digital.",
            preparation: "Tração lingual, sem anestesia.",
            findings: "Onda mucosa presente e simétrica bilateralmente. Amplitude de vibração normal. Periodicidade regular. Fechamento glótico completo.",
            conclusion: "Exame estroboscópico sem alterações funcionais ou estruturais.",
        },
        ExamType::VeuPalatino => ExamTemplate {
            equipment: "Nasofibroscópio flexível.",
            preparation: "Sem vasoconstritor.",
            findings: "Palato mole com boa mobilidade e elevação simétrica à fonação. Fechamento velofaríngeo completo durante a fala (série de fonemas orais e nasais).",
            conclusion: "Competência velofaríngea preservada.",
        },
        ExamType::Degluticao => ExamTemplate {
            equipment: "Nasofibroscópio flexível, oferta de alimentos em diferentes consistências corados.",
            preparation: "Sem anestesia para preservação da sensibilidade.",
            findings: "Fase faríngea da deglutição desencadeada no tempo correto. Elevação laríngea satisfatória. Ausência de estase em valéculas ou seios piriformes. Sem sinais de penetração ou aspiração laringotraqueal.",
            conclusion: "Deglutição funcional eficaz e segura para as consistências testadas.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_complete_template() {
        for exam_type in ExamType::all() {
            let template = exam_template(exam_type);
            assert!(!template.equipment.is_empty());
            assert!(!template.preparation.is_empty());
            assert!(!template.findings.is_empty());
            assert!(!template.conclusion.is_empty());
        }
    }

    #[test]
    fn test_to_exam_data_copies_verbatim() {
        let data = exam_template(ExamType::VeuPalatino).to_exam_data(ExamType::VeuPalatino);
        assert_eq!(data.exam_type, ExamType::VeuPalatino);
        assert_eq!(data.preparation, "Sem vasoconstritor.");
        assert_eq!(data.conclusion, "Competência velofaríngea preservada.");
    }
}
