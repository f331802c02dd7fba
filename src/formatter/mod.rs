//! # Response Formatter
//!
//! Monta a resposta final exibida ao usuário a partir do que o pipeline RAG
//! já calculou: resposta, explicação, citações e avaliação de confiança.
//!
//! ## Estrutura da saída
//! Seções separadas por uma linha em branco, sempre nesta ordem:
//! 1. Resposta
//! 2. Explicação (apenas se não vazia)
//! 3. Fontes (apenas se houver citações)
//! 4. Confiança (sempre)
//!
//! Nenhuma operação aqui falha: campos ausentes viram valores padrão.

use std::fmt;

use regex::Regex;

use crate::config::FormatterConfig;
use crate::payload::ResponsePayload;
use crate::types::{non_blank, ConfidenceAssessment, ConfidenceLevel, SourceCitation};
use crate::utils::{clean_quote, MAX_QUOTE_CHARS};

mod confidence;
mod grouping;
mod labels;

pub use confidence::{
    calculate_confidence, level_explanation, level_for_score, DEFAULT_ANSWER_CONSISTENCY,
};
pub use grouping::{group_sources_by_document, DocumentSources};
pub use labels::SectionLabels;

/// Resposta já decomposta em seções, antes de virar texto.
///
/// Quem controla formatação e resumo pode passar esta estrutura para
/// [`ResponseFormatter::summarize`] sem re-parsear o texto renderizado.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredResponse {
    /// Texto da resposta (já com trim)
    pub answer: String,
    /// Explicação, se houver conteúdo
    pub explanation: Option<String>,
    /// Entradas de fontes já renderizadas. `Some(vec![])` significa que havia
    /// citações mas nenhuma pôde ser exibida.
    pub sources: Option<Vec<String>>,
    /// Avaliação de confiança
    pub confidence: ConfidenceAssessment,
}

/// Formatador de respostas estruturadas
#[derive(Debug, Clone, Default)]
pub struct ResponseFormatter {
    config: FormatterConfig,
    labels: SectionLabels,
}

impl ResponseFormatter {
    /// Cria formatador com rótulos do idioma configurado
    pub fn new(config: FormatterConfig) -> Self {
        let labels = SectionLabels::for_language(config.language);
        Self { config, labels }
    }

    /// Cria formatador com tabela de rótulos customizada
    pub fn with_labels(config: FormatterConfig, labels: SectionLabels) -> Self {
        Self { config, labels }
    }

    /// Configuração ativa
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Rótulos ativos
    pub fn labels(&self) -> &SectionLabels {
        &self.labels
    }

    /// Formata uma resposta completa.
    ///
    /// # Argumentos
    /// * `answer` - Texto principal da resposta.
    /// * `explanation` - Explicação detalhada (vazia = seção omitida).
    /// * `sources` - Citações na ordem de relevância decidida pelo chamador.
    /// * `confidence` - Avaliação de confiança (`Default` = nível "Unknown").
    pub fn format(
        &self,
        answer: &str,
        explanation: &str,
        sources: &[SourceCitation],
        confidence: &ConfidenceAssessment,
    ) -> String {
        let structured = self.structure(answer, explanation, sources, confidence);
        self.render(&structured)
    }

    /// Decompõe a resposta em seções sem renderizar o texto final
    pub fn structure(
        &self,
        answer: &str,
        explanation: &str,
        sources: &[SourceCitation],
        confidence: &ConfidenceAssessment,
    ) -> StructuredResponse {
        let explanation = explanation.trim();

        let sources = if sources.is_empty() {
            None
        } else {
            let kept = &sources[..sources.len().min(self.config.max_sources)];
            let entries: Vec<String> = kept
                .iter()
                .enumerate()
                .filter_map(|(i, source)| self.format_single_source(source, i + 1))
                .collect();

            if entries.is_empty() {
                log::warn!(
                    "[format] {} sources provided but none had a usable citation",
                    kept.len()
                );
            }
            Some(entries)
        };

        StructuredResponse {
            answer: answer.trim().to_string(),
            explanation: (!explanation.is_empty()).then(|| explanation.to_string()),
            sources,
            confidence: confidence.clone(),
        }
    }

    /// Renderiza as seções como texto
    pub fn render(&self, response: &StructuredResponse) -> String {
        let mut parts = Vec::with_capacity(4);

        parts.push(format!("{}\n{}", self.header(&self.labels.answer), response.answer));

        if let Some(explanation) = &response.explanation {
            parts.push(format!("{}\n{}", self.header(&self.labels.explanation), explanation));
        }

        if let Some(entries) = &response.sources {
            let header = self.header(&self.labels.sources);
            if entries.is_empty() {
                parts.push(format!("{}\n{}", header, self.labels.sources_unavailable));
            } else {
                parts.push(format!("{}\n{}", header, entries.join("\n")));
            }
        }

        parts.push(self.render_confidence(&response.confidence));

        log::debug!(
            "[format] Rendered {} sections (markdown={})",
            parts.len(),
            self.config.use_markdown
        );

        parts.join("\n\n")
    }

    /// Formata a partir de um mapeamento JSON genérico com as chaves
    /// `answer`, `explanation`, `sources` e `confidence`.
    pub fn format_for_display(&self, response: &serde_json::Value) -> String {
        self.format_payload(&ResponsePayload::from_value(response))
    }

    /// Formata um payload já tipado
    pub fn format_payload(&self, payload: &ResponsePayload) -> String {
        self.format(
            &payload.answer,
            &payload.explanation,
            &payload.sources,
            &payload.confidence,
        )
    }

    /// Formata uma resposta de falha: desculpa como resposta, detalhes do
    /// erro como explicação e confiança "Very Low".
    pub fn format_error(&self, error: &dyn fmt::Display) -> String {
        log::warn!("[format_error] Rendering failure response: {}", error);

        let explanation = format!("{}: {}", self.labels.error_details, error);
        let confidence = ConfidenceAssessment::new(
            ConfidenceLevel::VeryLow,
            0.0,
            self.labels.technical_error.clone(),
        );
        self.format(&self.labels.error_answer, &explanation, &[], &confidence)
    }

    /// Formata uma única citação fora do contexto da resposta completa.
    ///
    /// `**label** - "trecho"` em markdown, só o rótulo se não houver trecho,
    /// string vazia se não houver rótulo utilizável.
    pub fn format_citation_with_quote(&self, citation: &SourceCitation) -> String {
        let Some(label) = self.citation_label(citation) else {
            return String::new();
        };

        let label = if self.config.use_markdown {
            format!("**{}**", label)
        } else {
            label
        };

        match citation.excerpt() {
            Some(quote) => format!("{} - \"{}\"", label, clean_quote(quote, MAX_QUOTE_CHARS)),
            None => label,
        }
    }

    /// Calcula a confiança (ver [`calculate_confidence`])
    pub fn calculate_confidence(
        &self,
        retrieval_scores: &[f64],
        answer_consistency: Option<f64>,
    ) -> ConfidenceAssessment {
        calculate_confidence(
            retrieval_scores,
            answer_consistency.unwrap_or(DEFAULT_ANSWER_CONSISTENCY),
        )
    }

    /// Extrai até 5 pontos-chave de uma explicação
    pub fn extract_key_points(&self, explanation: &str) -> Vec<String> {
        crate::utils::extract_key_points(explanation)
    }

    /// Agrupa citações por documento usando o token de página do idioma ativo
    pub fn group_sources(&self, sources: &[SourceCitation]) -> Vec<DocumentSources> {
        group_sources_by_document(sources, &self.labels.page)
    }

    /// Resumo curto a partir da estrutura, sem re-parsear texto
    pub fn summarize(&self, response: &StructuredResponse) -> String {
        self.render_summary(&response.answer, response.confidence.level.as_str())
    }

    /// Resumo curto de uma resposta já renderizada.
    ///
    /// Reconhece os dois formatos de cabeçalho (markdown e texto puro)
    /// do idioma ativo. Sem match, usa "Answer unavailable." e "Unknown".
    pub fn create_summary_response(&self, full_response: &str) -> String {
        let answer = self
            .extract_answer(full_response)
            .unwrap_or_else(|| self.labels.answer_unavailable.clone());

        let level = self
            .extract_confidence_level(full_response)
            .unwrap_or_else(|| ConfidenceLevel::Unknown.as_str().to_string());

        self.render_summary(&answer, &level)
    }

    fn extract_answer(&self, text: &str) -> Option<String> {
        let answer = regex::escape(&self.labels.answer);
        let markdown = format!(r"(?s)### {}\n(.*?)(?:\n### |\z)", answer);
        let plain = format!(
            r"(?s)(?:^|\n){}:\n(.*?)(?:\n(?:{}|{}|{}):|\z)",
            answer,
            regex::escape(&self.labels.explanation),
            regex::escape(&self.labels.sources),
            regex::escape(&self.labels.confidence),
        );

        [markdown, plain].iter().find_map(|pattern| {
            let re = compile(pattern)?;
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
    }

    fn extract_confidence_level(&self, text: &str) -> Option<String> {
        let pattern = format!(r"{}: ([^\n*]+)", regex::escape(&self.labels.confidence));
        compile(&pattern)?
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|level| !level.is_empty())
    }

    fn render_summary(&self, answer: &str, level: &str) -> String {
        if self.config.use_markdown {
            format!(
                "**{}:** {}\n\n*{}: {}*",
                self.labels.short_answer, answer, self.labels.confidence, level
            )
        } else {
            format!(
                "{}: {}\n\n{}: {}",
                self.labels.short_answer, answer, self.labels.confidence, level
            )
        }
    }

    fn header(&self, label: &str) -> String {
        if self.config.use_markdown {
            format!("### {}", label)
        } else {
            format!("{}:", label)
        }
    }

    fn render_confidence(&self, confidence: &ConfidenceAssessment) -> String {
        let header = format!("{}: {}", self.labels.confidence, confidence.level);
        let mut lines = vec![if self.config.use_markdown {
            format!("### {}", header)
        } else {
            header
        }];

        if !confidence.explanation.trim().is_empty() {
            lines.push(confidence.explanation.trim().to_string());
        }

        if confidence.score > 0.0 {
            let score = format!("{}: {:.2}/1.00", self.labels.score, confidence.score);
            if self.config.use_markdown {
                lines.push(format!("({})", score));
            } else {
                lines.push(score);
            }
        }

        lines.join("\n")
    }

    /// Rótulo da citação: `citation` pré-composta ou `título, página N, seção`
    fn citation_label(&self, source: &SourceCitation) -> Option<String> {
        if let Some(citation) = non_blank(source.citation.as_deref()) {
            return Some(citation.trim().to_string());
        }

        // Página e seção sozinhas não identificam a fonte
        let title = non_blank(source.document_title.as_deref())?;

        let mut parts = vec![title.trim().to_string()];
        if let Some(page) = source.page() {
            parts.push(format!("{} {}", self.labels.page, page));
        }
        if let Some(section) = non_blank(source.section_title.as_deref()) {
            parts.push(section.trim().to_string());
        }

        Some(parts.join(", "))
    }

    fn format_single_source(&self, source: &SourceCitation, index: usize) -> Option<String> {
        let Some(label) = self.citation_label(source) else {
            log::debug!("[format] Dropping source #{} without citation label", index);
            return None;
        };

        let mut entry = if self.config.use_markdown {
            format!("{}. **{}**", index, label)
        } else {
            format!("{}. {}", index, label)
        };

        if let Some(quote) = source.excerpt() {
            let cleaned = clean_quote(quote, MAX_QUOTE_CHARS);
            if self.config.use_markdown {
                entry.push_str(&format!("\n   > \"{}\"", cleaned));
            } else {
                entry.push_str(&format!("\n   \"{}\"", cleaned));
            }
        }

        Some(entry)
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("[create_summary_response] Invalid section pattern: {}", e);
            None
        }
    }
}
