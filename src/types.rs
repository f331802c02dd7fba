// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS COMPARTILHADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fmt;

use serde::{Deserialize, Serialize};

/// Idiomas com tabela de rótulos embutida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Inglês (padrão)
    #[default]
    English,
    /// Russo
    Russian,
    /// Português
    Portuguese,
}

impl Language {
    /// Converte código ISO-639-1 ou nome em inglês para `Language`.
    ///
    /// Case-insensitive. Qualquer valor desconhecido cai em `English`.
    pub fn from_code(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ru" | "rus" | "russian" => Self::Russian,
            "pt" | "pt-br" | "por" | "portuguese" => Self::Portuguese,
            _ => Self::English,
        }
    }

    /// Retorna o código ISO-639-1
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
            Self::Portuguese => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Citação de uma fonte recuperada.
///
/// Todos os campos são opcionais: a citação vem do componente de busca
/// e o formatter apenas lê. Campos ausentes degradam para "sem valor".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCitation {
    /// Texto de citação já composto (tem prioridade sobre as partes)
    pub citation: Option<String>,
    /// Trecho citado da fonte
    pub quote: Option<String>,
    /// Trecho alternativo vindo do índice de citações
    pub text_snippet: Option<String>,
    /// Score de relevância da busca
    pub relevance_score: Option<f64>,
    /// Título do documento
    pub document_title: Option<String>,
    /// Número da página (0 é tratado como ausente)
    pub page_number: Option<u32>,
    /// Título da seção
    pub section_title: Option<String>,
}

impl SourceCitation {
    /// Cria citação apenas com título do documento
    pub fn new(document_title: impl Into<String>) -> Self {
        Self {
            document_title: Some(document_title.into()),
            ..Self::default()
        }
    }

    /// Define a página
    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    /// Define a seção
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section_title = Some(section.into());
        self
    }

    /// Define o trecho citado
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    /// Define o texto de citação pré-composto
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Define o score de relevância
    pub fn with_relevance(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    /// Página válida (maior que zero)
    pub fn page(&self) -> Option<u32> {
        self.page_number.filter(|p| *p > 0)
    }

    /// Trecho a exibir: `quote` se não vazio, senão `text_snippet`
    pub fn excerpt(&self) -> Option<&str> {
        non_blank(self.quote.as_deref()).or_else(|| non_blank(self.text_snippet.as_deref()))
    }
}

/// Retorna o texto apenas se tiver conteúdo além de whitespace
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Nível qualitativo de confiança
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfidenceLevel {
    /// Várias fontes de alta qualidade e consistentes
    High,
    /// Boa informação, confiança razoável
    Medium,
    /// Qualidade ou consistência limitada
    Low,
    /// Fontes insuficientes ou ausentes
    VeryLow,
    /// Nível não informado
    #[default]
    Unknown,
}

impl ConfidenceLevel {
    /// Retorna o rótulo de exibição
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
            Self::Unknown => "Unknown",
        }
    }

    /// Converte rótulo para nível. Case-insensitive; desconhecido vira `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "very low" | "very_low" | "verylow" => Self::VeryLow,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ConfidenceLevel {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<ConfidenceLevel> for String {
    fn from(level: ConfidenceLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Avaliação de confiança de uma resposta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceAssessment {
    /// Nível qualitativo
    pub level: ConfidenceLevel,
    /// Score numérico (0.0 - 1.0)
    pub score: f64,
    /// Explicação em texto livre
    pub explanation: String,
}

impl ConfidenceAssessment {
    /// Cria uma avaliação completa
    pub fn new(level: ConfidenceLevel, score: f64, explanation: impl Into<String>) -> Self {
        Self {
            level,
            score,
            explanation: explanation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("ru"), Language::Russian);
        assert_eq!(Language::from_code("PT-BR"), Language::Portuguese);
        assert_eq!(Language::from_code(" english "), Language::English);
        assert_eq!(Language::from_code("klingon"), Language::English);
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_confidence_level_labels() {
        assert_eq!(ConfidenceLevel::VeryLow.as_str(), "Very Low");
        assert_eq!(ConfidenceLevel::from_label("very low"), ConfidenceLevel::VeryLow);
        assert_eq!(ConfidenceLevel::from_label("HIGH"), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_label("certain"), ConfidenceLevel::Unknown);
    }

    #[test]
    fn test_confidence_assessment_deserialize_defaults() {
        let parsed: ConfidenceAssessment = serde_json::from_str(r#"{"level": "Very Low"}"#).unwrap();
        assert_eq!(parsed.level, ConfidenceLevel::VeryLow);
        assert_eq!(parsed.score, 0.0);
        assert!(parsed.explanation.is_empty());

        let empty: ConfidenceAssessment = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ConfidenceAssessment::default());
    }

    #[test]
    fn test_confidence_level_serializes_as_label() {
        let json = serde_json::to_string(&ConfidenceLevel::VeryLow).unwrap();
        assert_eq!(json, "\"Very Low\"");
    }

    #[test]
    fn test_source_citation_excerpt_fallback() {
        let mut source = SourceCitation::new("Doc").with_quote("   ");
        source.text_snippet = Some("snippet".into());
        assert_eq!(source.excerpt(), Some("snippet"));

        let source = SourceCitation::new("Doc").with_quote("quote");
        assert_eq!(source.excerpt(), Some("quote"));

        assert_eq!(SourceCitation::default().excerpt(), None);
    }

    #[test]
    fn test_source_citation_zero_page_is_absent() {
        assert_eq!(SourceCitation::new("Doc").with_page(0).page(), None);
        assert_eq!(SourceCitation::new("Doc").with_page(7).page(), Some(7));
    }
}
