//! Tabela de rótulos de exibição por idioma.
//!
//! Todo literal visível ao usuário passa por aqui. As tabelas embutidas
//! cobrem inglês, russo e português; chamadores podem montar a sua.

use crate::types::Language;

/// Rótulos usados na renderização de uma resposta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    /// Cabeçalho da seção de resposta
    pub answer: String,
    /// Cabeçalho da seção de explicação
    pub explanation: String,
    /// Cabeçalho da seção de fontes
    pub sources: String,
    /// Cabeçalho da seção de confiança (seguido de `: <nível>`)
    pub confidence: String,
    /// Aviso quando nenhuma fonte pôde ser renderizada
    pub sources_unavailable: String,
    /// Rótulo da linha de score
    pub score: String,
    /// Token de página na citação (`page 3`)
    pub page: String,
    /// Rótulo do resumo curto
    pub short_answer: String,
    /// Fallback quando o resumo não encontra a resposta
    pub answer_unavailable: String,
    /// Resposta exibida quando a consulta falhou
    pub error_answer: String,
    /// Prefixo dos detalhes do erro
    pub error_details: String,
    /// Explicação de confiança para falhas técnicas
    pub technical_error: String,
}

impl SectionLabels {
    /// Tabela embutida para o idioma
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Russian => Self::russian(),
            Language::Portuguese => Self::portuguese(),
        }
    }

    fn english() -> Self {
        Self {
            answer: "Answer".into(),
            explanation: "Explanation".into(),
            sources: "Sources".into(),
            confidence: "Confidence level".into(),
            sources_unavailable: "Sources unavailable.".into(),
            score: "Score".into(),
            page: "page".into(),
            short_answer: "Short answer".into(),
            answer_unavailable: "Answer unavailable.".into(),
            error_answer: "Sorry, an error occurred while processing your question.".into(),
            error_details: "Error details".into(),
            technical_error: "Technical error.".into(),
        }
    }

    fn russian() -> Self {
        Self {
            answer: "Ответ".into(),
            explanation: "Объяснение".into(),
            sources: "Источники".into(),
            confidence: "Уровень уверенности".into(),
            sources_unavailable: "Источники недоступны.".into(),
            score: "Оценка".into(),
            page: "стр.".into(),
            short_answer: "Краткий ответ".into(),
            answer_unavailable: "Ответ недоступен.".into(),
            error_answer: "Извините, произошла ошибка при обработке вашего вопроса.".into(),
            error_details: "Детали ошибки".into(),
            technical_error: "Техническая ошибка.".into(),
        }
    }

    fn portuguese() -> Self {
        Self {
            answer: "Resposta".into(),
            explanation: "Explicação".into(),
            sources: "Fontes".into(),
            confidence: "Nível de confiança".into(),
            sources_unavailable: "Fontes indisponíveis.".into(),
            score: "Pontuação".into(),
            page: "pág.".into(),
            short_answer: "Resposta curta".into(),
            answer_unavailable: "Resposta indisponível.".into(),
            error_answer: "Desculpe, ocorreu um erro ao processar sua pergunta.".into(),
            error_details: "Detalhes do erro".into(),
            technical_error: "Erro técnico.".into(),
        }
    }
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(SectionLabels::default(), SectionLabels::for_language(Language::English));
        assert_eq!(SectionLabels::default().answer, "Answer");
    }

    #[test]
    fn test_russian_table() {
        let labels = SectionLabels::for_language(Language::Russian);
        assert_eq!(labels.answer, "Ответ");
        assert_eq!(labels.page, "стр.");
    }

    #[test]
    fn test_notices_end_with_period_in_every_language() {
        for language in [Language::English, Language::Russian, Language::Portuguese] {
            let labels = SectionLabels::for_language(language);
            assert!(labels.technical_error.ends_with('.'), "{:?}", language);
            assert!(labels.sources_unavailable.ends_with('.'), "{:?}", language);
            assert!(labels.answer_unavailable.ends_with('.'), "{:?}", language);
        }
    }
}
