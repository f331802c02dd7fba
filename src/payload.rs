//! Payload de resposta vindo da camada de geração.
//!
//! O mapeamento genérico (`answer`, `explanation`, `sources`, `confidence`)
//! é lido de forma tolerante: chave ausente ou de tipo errado vira o valor
//! padrão e gera um `warn`, sem derrubar a formatação.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormatterError;
use crate::types::{ConfidenceAssessment, ConfidenceLevel, SourceCitation};

/// Resposta pronta para formatação
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsePayload {
    /// Texto da resposta
    pub answer: String,
    /// Explicação detalhada
    pub explanation: String,
    /// Citações recuperadas
    pub sources: Vec<SourceCitation>,
    /// Avaliação de confiança
    pub confidence: ConfidenceAssessment,
}

impl ResponsePayload {
    /// Extrai o payload de um valor JSON qualquer.
    ///
    /// Nunca falha: um valor que não é objeto gera payload vazio.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            log::warn!(
                "[payload] Expected JSON object, got {}; using empty payload",
                value_kind(value)
            );
            return Self::default();
        };

        Self {
            answer: text_field(map, "answer"),
            explanation: text_field(map, "explanation"),
            sources: sources_field(map),
            confidence: confidence_field(map),
        }
    }

    /// Decodifica texto JSON. Falha apenas se o JSON for inválido ou não for objeto.
    pub fn from_json_str(raw: &str) -> Result<Self, FormatterError> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(FormatterError::NotAnObject(value_kind(&value)));
        }
        Ok(Self::from_value(&value))
    }

    /// Lê e decodifica JSON de um reader (arquivo, stdin)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, FormatterError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Texto tolerante: números e booleanos viram string, o resto vira vazio
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => as_text(value).unwrap_or_else(|| {
            log::warn!("[payload] Field '{}' is a {}, using empty text", key, value_kind(value));
            String::new()
        }),
    }
}

fn optional_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(as_text)
}

fn page_number(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    let page = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .and_then(|p| u32::try_from(p).ok());

    if page.is_none() {
        log::warn!("[payload] Invalid page_number {}, ignoring", value);
    }
    page
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn citation_from_map(map: &Map<String, Value>) -> SourceCitation {
    SourceCitation {
        citation: optional_text(map, "citation"),
        quote: optional_text(map, "quote"),
        text_snippet: optional_text(map, "text_snippet"),
        relevance_score: number(map.get("relevance_score")),
        document_title: optional_text(map, "document_title"),
        page_number: page_number(map.get("page_number")),
        section_title: optional_text(map, "section_title"),
    }
}

fn sources_field(map: &Map<String, Value>) -> Vec<SourceCitation> {
    match map.get("sources") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry.as_object() {
                Some(source) => citation_from_map(source),
                None => {
                    // Mantém a posição: a entrada vazia é descartada na renderização
                    log::warn!(
                        "[payload] Source #{} is a {}, using empty citation",
                        i + 1,
                        value_kind(entry)
                    );
                    SourceCitation::default()
                }
            })
            .collect(),
        Some(other) => {
            log::warn!("[payload] Field 'sources' is a {}, ignoring", value_kind(other));
            Vec::new()
        }
    }
}

fn confidence_field(map: &Map<String, Value>) -> ConfidenceAssessment {
    let Some(confidence) = map.get("confidence").and_then(Value::as_object) else {
        return ConfidenceAssessment::default();
    };

    ConfidenceAssessment {
        level: confidence
            .get("level")
            .and_then(Value::as_str)
            .map(ConfidenceLevel::from_label)
            .unwrap_or_default(),
        score: number(confidence.get("score")).unwrap_or(0.0),
        explanation: optional_text(confidence, "explanation").unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_default() {
        let payload = ResponsePayload::from_value(&json!({}));
        assert_eq!(payload, ResponsePayload::default());
    }

    #[test]
    fn test_full_payload() {
        let payload = ResponsePayload::from_value(&json!({
            "answer": "A",
            "explanation": "B",
            "sources": [{"document_title": "Doc", "page_number": 3, "quote": "q", "relevance_score": 0.8}],
            "confidence": {"level": "High", "score": 0.9, "explanation": "good"}
        }));
        assert_eq!(payload.answer, "A");
        assert_eq!(payload.sources.len(), 1);
        assert_eq!(payload.sources[0].page_number, Some(3));
        assert_eq!(payload.sources[0].relevance_score, Some(0.8));
        assert_eq!(payload.confidence.level, ConfidenceLevel::High);
        assert_eq!(payload.confidence.score, 0.9);
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let payload = ResponsePayload::from_value(&json!({
            "answer": ["not", "text"],
            "sources": ["bad", {"document_title": "Doc", "page_number": "12"}],
            "confidence": {"level": "Certain", "score": "0.5"}
        }));
        assert!(payload.answer.is_empty());
        assert_eq!(payload.sources.len(), 2);
        assert_eq!(payload.sources[0], SourceCitation::default());
        assert_eq!(payload.sources[1].page_number, Some(12));
        assert_eq!(payload.confidence.level, ConfidenceLevel::Unknown);
        assert_eq!(payload.confidence.score, 0.5);
    }

    #[test]
    fn test_integral_float_page_is_accepted() {
        let payload = ResponsePayload::from_value(&json!({
            "sources": [
                {"document_title": "Doc", "page_number": 3.0},
                {"document_title": "Doc", "page_number": 3.5},
                {"document_title": "Doc", "page_number": -2}
            ]
        }));
        assert_eq!(payload.sources[0].page_number, Some(3));
        assert_eq!(payload.sources[1].page_number, None);
        assert_eq!(payload.sources[2].page_number, None);
    }

    #[test]
    fn test_non_object_value_is_empty_payload() {
        assert_eq!(ResponsePayload::from_value(&json!([1, 2])), ResponsePayload::default());
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(
            ResponsePayload::from_json_str("{not json"),
            Err(FormatterError::Json(_))
        ));
        assert!(matches!(
            ResponsePayload::from_json_str("[]"),
            Err(FormatterError::NotAnObject("array"))
        ));
    }

    #[test]
    fn test_from_reader() {
        let raw = br#"{"answer": "Paris."}"#;
        let payload = ResponsePayload::from_reader(&raw[..]).unwrap();
        assert_eq!(payload.answer, "Paris.");
    }
}
