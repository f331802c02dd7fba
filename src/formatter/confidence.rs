//! Heurística de confiança a partir dos scores de recuperação.
//!
//! `final = 0.7 * score_normalizado + 0.3 * consistência`, com níveis por
//! limiar avaliados de cima para baixo.
//!
//! Quando a média passa de 0.7 ela é dividida pela quantidade de scores.
//! Isso faz a confiança CAIR conforme mais fontes boas chegam; o comportamento
//! é mantido como está para compatibilidade com respostas já exibidas.

use crate::types::{ConfidenceAssessment, ConfidenceLevel};

/// Consistência assumida quando o chamador não informa
pub const DEFAULT_ANSWER_CONSISTENCY: f64 = 0.8;

const RETRIEVAL_WEIGHT: f64 = 0.7;
const CONSISTENCY_WEIGHT: f64 = 0.3;
const NORMALIZATION_THRESHOLD: f64 = 0.7;

const HIGH_THRESHOLD: f64 = 0.8;
const MEDIUM_THRESHOLD: f64 = 0.6;
const LOW_THRESHOLD: f64 = 0.4;

const NO_SOURCES_EXPLANATION: &str = "No sources available for verification.";

/// Calcula a avaliação de confiança.
///
/// # Argumentos
/// * `retrieval_scores` - Scores de relevância da busca (não são limitados a [0, 1]).
/// * `answer_consistency` - Quão consistente/fundamentada a resposta foi julgada.
pub fn calculate_confidence(retrieval_scores: &[f64], answer_consistency: f64) -> ConfidenceAssessment {
    if retrieval_scores.is_empty() {
        log::debug!("[calculate_confidence] No retrieval scores, returning Very Low");
        return ConfidenceAssessment::new(ConfidenceLevel::VeryLow, 0.0, NO_SOURCES_EXPLANATION);
    }

    let count = retrieval_scores.len() as f64;
    let mean = retrieval_scores.iter().sum::<f64>() / count;

    let normalized = if mean > NORMALIZATION_THRESHOLD {
        mean / count
    } else {
        mean
    };

    let final_score = RETRIEVAL_WEIGHT * normalized + CONSISTENCY_WEIGHT * answer_consistency;
    let level = level_for_score(final_score);

    log::debug!(
        "[calculate_confidence] {} scores, mean={:.3}, normalized={:.3}, final={:.3} → {}",
        retrieval_scores.len(),
        mean,
        normalized,
        final_score,
        level
    );

    ConfidenceAssessment::new(level, final_score, level_explanation(level))
}

/// Mapeia score final para nível (primeiro limiar que casar)
pub fn level_for_score(score: f64) -> ConfidenceLevel {
    if score > HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score > MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else if score > LOW_THRESHOLD {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::VeryLow
    }
}

/// Explicação fixa de cada nível calculado
pub fn level_explanation(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::High => {
            "Multiple high-quality sources provide consistent and reliable information."
        }
        ConfidenceLevel::Medium => {
            "Sources provide good information with reasonable confidence in the answer."
        }
        ConfidenceLevel::Low => "Limited source quality or consistency, answer should be verified.",
        ConfidenceLevel::VeryLow | ConfidenceLevel::Unknown => {
            "Insufficient or low-quality sources, answer reliability is questionable."
        }
    }
}
