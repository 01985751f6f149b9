// Printable HTML rendering of the report
use std::fmt::Write;

use crate::report::ReportSession;

const REPORT_STYLE: &str = r#"
  @page { size: A4; margin: 15mm; }
  body { font-family: "Helvetica Neue", Arial, sans-serif; color: #1e293b; margin: 0; }
  .report { max-width: 210mm; margin: 0 auto; }
  header { display: flex; justify-content: space-between; align-items: flex-start;
           border-bottom: 2px solid #0ea5e9; padding-bottom: 12px; margin-bottom: 20px; }
  header h1 { font-size: 20px; text-transform: uppercase; letter-spacing: 0.05em; margin: 0; }
  header p { font-size: 12px; color: #475569; margin: 2px 0; }
  .doctor { text-align: right; }
  .doctor h2 { font-size: 16px; color: #0369a1; margin: 0; }
  .patient { display: grid; grid-template-columns: 8fr 2fr 2fr; gap: 12px; margin-bottom: 20px; }
  .patient label { display: block; font-size: 10px; font-weight: bold; color: #64748b; text-transform: uppercase; }
  .exam-title { text-align: center; text-transform: uppercase; font-size: 20px;
                border-bottom: 2px solid #e2e8f0; padding-bottom: 8px; }
  section h3 { font-size: 12px; color: #0369a1; text-transform: uppercase; margin-bottom: 4px; }
  section p { text-align: justify; line-height: 1.6; white-space: pre-wrap; margin: 0; }
  .conclusion p { font-weight: bold; }
  .signature { margin-top: 60px; text-align: center; }
  .signature div { display: inline-block; border-top: 1px solid #94a3b8; padding: 6px 48px 0; }
  .attachments { margin-top: 30px; page-break-inside: avoid; }
  .attachments h3 { font-size: 10px; color: #94a3b8; border-bottom: 1px solid #e2e8f0; }
  .images { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
  .images img { width: 100%; aspect-ratio: 16 / 9; object-fit: contain; background: #000; }
  .video { display: flex; gap: 20px; align-items: center; border-top: 1px solid #e2e8f0;
           margin-top: 20px; padding-top: 20px; }
  .video img { width: 128px; height: 128px; }
  .video .link { font-family: monospace; font-size: 10px; color: #94a3b8; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn render_report_html(session: &ReportSession) -> String {
    let doctor = &session.doctor;
    let patient = &session.patient;
    let exam = &session.exam;

    let mut html = String::with_capacity(16 * 1024);
    // Writing into a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Laudo - {title}</title>
<style>{style}</style>
</head>
<body>
<div class="report">
<header>
  <div>
    <h1>{clinic}</h1>
    <p>{address}</p>
    <p>Tel: {phone}</p>
  </div>
  <div class="doctor">
    <h2>{doctor}</h2>
    <p>CRM: {crm} | RQE: {rqe}</p>
  </div>
</header>
<div class="patient">
  <div><label>Nome do Paciente</label>{patient_name}</div>
  <div><label>Idade</label>{age}</div>
  <div><label>Sexo</label>{sex}</div>
  <div><label>Data</label>{date}</div>
</div>
<h2 class="exam-title">{exam_title}</h2>
<section><h3>Equipamento e Técnica</h3><p>{technique}</p></section>
<section><h3>Descrição dos Achados</h3><p>{findings}</p></section>
<section class="conclusion"><h3>Conclusão</h3><p>{conclusion}</p></section>
<div class="signature"><div>
  <strong>{doctor}</strong>
  <p>CRM {crm} | RQE {rqe}</p>
</div></div>
"#,
        title = escape_html(&patient.name),
        style = REPORT_STYLE,
        clinic = escape_html(&doctor.clinic_name),
        address = escape_html(&doctor.address),
        phone = escape_html(&doctor.phone),
        doctor = escape_html(&doctor.name),
        crm = escape_html(&doctor.crm),
        rqe = escape_html(&doctor.rqe),
        patient_name = escape_html(&patient.name),
        age = escape_html(&patient.age),
        sex = patient.sex.as_str(),
        date = escape_html(&patient.date),
        exam_title = escape_html(&exam.exam_type.label().to_uppercase()),
        technique = escape_html(&session.technique_text()),
        findings = escape_html(&exam.findings),
        conclusion = escape_html(&exam.conclusion),
    );

    html.push_str("<div class=\"attachments\">\n<h3>Imagens do Exame</h3>\n<div class=\"images\">\n");
    for (index, image) in session.media.images().enumerate() {
        let _ = writeln!(
            html,
            "  <img src=\"{}\" alt=\"Captura {}\">",
            escape_html(&image.url),
            index + 1
        );
    }
    html.push_str("</div>\n");

    if let Some(link) = &session.video_link {
        let _ = write!(
            html,
            r#"<div class="video">
  <img src="{qr}" alt="QR Code do Vídeo">
  <div>
    <h4>Vídeo do Exame Disponível</h4>
    <p>Aponte a câmera do seu celular para o QR Code ao lado para assistir ao vídeo completo do exame armazenado em nuvem segura.</p>
    <p class="link">{url}</p>
  </div>
</div>
"#,
            qr = escape_html(&link.qr_code_url),
            url = escape_html(&link.url),
        );
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use crate::publish::VideoLink;
    use crate::report::{DoctorInfo, ExamFieldsUpdate, ExamType, PatientUpdate};

    fn session() -> ReportSession {
        let mut session = ReportSession::new(DoctorInfo::default());
        session.update_patient(PatientUpdate {
            name: Some("Ana <Teste>".to_string()),
            age: Some("42 anos".to_string()),
            ..Default::default()
        });
        session.select_exam_type(ExamType::Degluticao);
        session
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_sections() {
        let html = render_report_html(&session());

        assert!(html.contains("Clínica Otorrino Avançada"));
        assert!(html.contains("Tel: (11) 99999-9999"));
        assert!(html.contains("CRM: 12345-SP | RQE: 9876"));
        assert!(html.contains("VIDEO-ENDOSCOPIA DA DEGLUTIÇÃO (FEES)"));
        assert!(html.contains("Equipamento e Técnica"));
        assert!(html.contains("Descrição dos Achados"));
        assert!(html.contains("Conclusão"));
        assert!(html.contains("Imagens do Exame"));
        assert!(html.contains("42 anos"));
        assert!(html.contains("Masculino"));
        assert!(!html.contains("Vídeo do Exame Disponível"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut session = session();
        session.update_exam_fields(ExamFieldsUpdate {
            findings: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        });
        let html = render_report_html(&session);

        assert!(html.contains("Ana &lt;Teste&gt;"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_images_and_video_link() {
        let mut session = session();
        session
            .media
            .append(MediaItem::image("data:image/jpeg;base64,AAAA".to_string(), None))
            .unwrap();
        session
            .media
            .append(MediaItem::image("data:image/jpeg;base64,BBBB".to_string(), None))
            .unwrap();
        session.video_link = Some(VideoLink {
            url: "https://youtube.com/watch?v=DEMO_abc_Ana".to_string(),
            qr_code_url: "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=x".to_string(),
        });

        let html = render_report_html(&session);
        assert!(html.contains(r#"<img src="data:image/jpeg;base64,AAAA" alt="Captura 1">"#));
        assert!(html.contains(r#"alt="Captura 2""#));
        assert!(html.contains("Vídeo do Exame Disponível"));
        assert!(html.contains("size=150x150&amp;data=x"));
        assert!(html.contains("https://youtube.com/watch?v=DEMO_abc_Ana"));
    }
}
