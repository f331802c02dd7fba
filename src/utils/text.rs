// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TEXT UTILITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Utilitários para processamento de texto:
// - Normalização de whitespace
// - Limpeza e truncamento de citações
// - Extração de pontos-chave
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use once_cell::sync::Lazy;
use regex::Regex;

/// Orçamento de caracteres de uma citação
pub const MAX_QUOTE_CHARS: usize = 300;

/// Fração do orçamento a partir da qual um fim de sentença é aceito como corte
const SENTENCE_BOUNDARY_RATIO: f64 = 0.7;

/// Marcador anexado quando a citação é cortada fora de fim de sentença
pub const ELLIPSIS: &str = "...";

/// Máximo de pontos-chave retornados
pub const MAX_KEY_POINTS: usize = 5;

/// Tamanho mínimo (exclusivo) de um ponto-chave
const MIN_KEY_POINT_CHARS: usize = 10;

static SENTENCE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence split pattern"));

static LEADING_CONNECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(However|Moreover|Furthermore|Additionally|Therefore|Thus),?\s*")
        .expect("valid connective pattern")
});

/// Colapsa sequências de whitespace em um espaço e remove as bordas
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Limpa uma citação para exibição.
///
/// Colapsa whitespace e, se passar de `max_chars`, corta:
/// 1. no último `.`, `!` ou `?` do prefixo, se ele estiver a partir de 70% do orçamento
/// 2. senão no último espaço do prefixo, anexando `...`
/// 3. senão no próprio orçamento, anexando `...`
///
/// O tamanho é contado em caracteres, não bytes.
pub fn clean_quote(quote: &str, max_chars: usize) -> String {
    let cleaned = collapse_whitespace(quote);
    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_chars).collect();

    let sentence_end = truncated
        .char_indices()
        .enumerate()
        .filter(|(_, (_, c))| matches!(c, '.' | '!' | '?'))
        .last();

    if let Some((char_pos, (byte_pos, c))) = sentence_end {
        if char_pos as f64 >= max_chars as f64 * SENTENCE_BOUNDARY_RATIO {
            return truncated[..byte_pos + c.len_utf8()].to_string();
        }
    }

    match truncated.rfind(' ') {
        Some(space) if space > 0 => format!("{}{}", &truncated[..space], ELLIPSIS),
        _ => format!("{}{}", truncated, ELLIPSIS),
    }
}

/// Extrai até 5 pontos-chave de uma explicação.
///
/// Quebra em sequências de `.`/`!`/`?`, remove conectivos iniciais
/// ("However", "Moreover", ...) e descarta fragmentos com 10 caracteres ou menos.
pub fn extract_key_points(explanation: &str) -> Vec<String> {
    if explanation.trim().is_empty() {
        return Vec::new();
    }

    SENTENCE_SPLIT
        .split(explanation)
        .map(|fragment| {
            let fragment = fragment.trim();
            LEADING_CONNECTIVE.replace(fragment, "").trim().to_string()
        })
        .filter(|point| point.chars().count() > MIN_KEY_POINT_CHARS)
        .take(MAX_KEY_POINTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Hello \n\t world  "), "Hello world");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_clean_quote_short_is_unchanged() {
        assert_eq!(clean_quote("A short   quote.\n", MAX_QUOTE_CHARS), "A short quote.");
    }

    #[test]
    fn test_clean_quote_is_idempotent() {
        let once = clean_quote(&"word ".repeat(40), MAX_QUOTE_CHARS);
        assert_eq!(clean_quote(&once, MAX_QUOTE_CHARS), once);
    }

    #[test]
    fn test_clean_quote_cuts_at_late_sentence_boundary() {
        // Ponto final na posição 249 (>= 210), seguido de mais texto
        let quote = format!("{}. {}", "a".repeat(249), "b ".repeat(100));
        let cleaned = clean_quote(&quote, MAX_QUOTE_CHARS);
        assert_eq!(cleaned.chars().count(), 250);
        assert!(cleaned.ends_with('.'));
    }

    #[test]
    fn test_clean_quote_ignores_early_sentence_boundary() {
        // Ponto na posição 50 (< 210): corta no último espaço
        let quote = format!("{}. {}", "a".repeat(50), "word ".repeat(100));
        let cleaned = clean_quote(&quote, MAX_QUOTE_CHARS);
        assert!(cleaned.ends_with("word..."));
        assert!(cleaned.chars().count() <= MAX_QUOTE_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn test_clean_quote_boundary_exactly_at_seventy_percent() {
        // Ponto no índice 210 = 70% de 300: corta ali, inclusive
        let quote = format!("{}.{}", "a".repeat(210), " word".repeat(30));
        let cleaned = clean_quote(&quote, MAX_QUOTE_CHARS);
        assert_eq!(cleaned, format!("{}.", "a".repeat(210)));
    }

    #[test]
    fn test_clean_quote_boundary_just_below_seventy_percent() {
        // Ponto no índice 209: cai no último espaço com reticências
        let quote = format!("{}.{}", "a".repeat(209), " word".repeat(30));
        let cleaned = clean_quote(&quote, MAX_QUOTE_CHARS);
        assert!(cleaned.ends_with(" word..."));
        assert!(cleaned.starts_with(&format!("{}. word", "a".repeat(209))));
        assert!(cleaned.chars().count() <= MAX_QUOTE_CHARS + ELLIPSIS.len());
    }

    #[test]
    fn test_clean_quote_hard_cut_without_whitespace() {
        let cleaned = clean_quote(&"x".repeat(500), MAX_QUOTE_CHARS);
        assert_eq!(cleaned, format!("{}...", "x".repeat(300)));
    }

    #[test]
    fn test_clean_quote_counts_chars_not_bytes() {
        let quote = "ж".repeat(400);
        let cleaned = clean_quote(&quote, MAX_QUOTE_CHARS);
        assert_eq!(cleaned.chars().count(), MAX_QUOTE_CHARS + 3);
    }

    #[test]
    fn test_extract_key_points_strips_connectives() {
        let points = extract_key_points(
            "Revenue grew strongly in 2023. However, margins declined sharply! Ok. Thus costs rose overall?",
        );
        assert_eq!(
            points,
            vec![
                "Revenue grew strongly in 2023".to_string(),
                "margins declined sharply".to_string(),
                "costs rose overall".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_key_points_limits_to_five() {
        let text = "This is a long sentence number one. ".repeat(8);
        let points = extract_key_points(&text);
        assert_eq!(points.len(), MAX_KEY_POINTS);
        assert!(points.iter().all(|p| p.chars().count() > 10));
    }

    #[test]
    fn test_extract_key_points_empty() {
        assert!(extract_key_points("").is_empty());
        assert!(extract_key_points("   ").is_empty());
    }
}
