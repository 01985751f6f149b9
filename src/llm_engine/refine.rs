// Findings refinement: rewrite the doctor's notes as formal report prose
use crate::llm_engine::provider::{CompletionRequest, LlmError, LlmProvider};
use crate::report::ExamType;

/// Shown when refinement fails for any reason
pub const REFINE_ERROR_MESSAGE: &str = "Erro ao conectar com a IA. Verifique sua chave de API.";

pub fn build_refine_prompt(findings: &str, exam_label: &str) -> String {
    format!(
        "Você é um otorrinolaringologista experiente.\n\
         Reescreva os achados clínicos abaixo de forma técnica, formal e profissional para um laudo médico de {exam_label}.\n\
         Mantenha a factualidade, corrija erros ortográficos e melhore o fluxo do texto.\n\
         Não invente informações, apenas formate o que foi fornecido.\n\
         \n\
         Achados originais (notas do médico):\n\
         \"{findings}\"\n\
         \n\
         Responda apenas com o texto reescrito dos achados."
    )
}

/// Rewrite `findings` for the given exam. An empty string is returned
/// unchanged without a request; an empty answer keeps the original text.
pub async fn refine_findings(
    provider: &dyn LlmProvider,
    findings: &str,
    exam_type: ExamType,
) -> Result<String, LlmError> {
    if findings.is_empty() {
        return Ok(findings.to_string());
    }

    let prompt = build_refine_prompt(findings, exam_type.label());
    let response = provider.complete(CompletionRequest::new(prompt)).await?;
    log::debug!(
        "Refinement by {}: {:?} prompt tokens, {:?} output tokens, finish {:?}",
        response.model,
        response.prompt_tokens,
        response.completion_tokens,
        response.finish_reason
    );

    let refined = response.content.trim();
    if refined.is_empty() {
        log::warn!("Model returned no text; keeping original findings");
        return Ok(findings.to_string());
    }
    Ok(refined.to_string())
}
