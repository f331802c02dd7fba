// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO FORMATTER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Configuração fixa na construção do ResponseFormatter.
// Pode ser definida via .env
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::types::Language;

/// Número padrão de fontes exibidas
pub const DEFAULT_MAX_SOURCES: usize = 5;

/// Configuração do ResponseFormatter.
///
/// Imutável depois de entregue ao formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Cabeçalhos `###` e ênfase markdown (true) ou rótulos em texto puro (false).
    /// Padrão: true
    pub use_markdown: bool,

    /// Máximo de citações renderizadas (sempre >= 1).
    /// Padrão: 5
    pub max_sources: usize,

    /// Idioma da tabela de rótulos.
    /// Padrão: English
    pub language: Language,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            use_markdown: true,
            max_sources: DEFAULT_MAX_SOURCES,
            language: Language::default(),
        }
    }
}

impl FormatterConfig {
    /// Cria configuração. `max_sources` igual a 0 vira 1.
    pub fn new(use_markdown: bool, max_sources: usize) -> Self {
        Self {
            use_markdown,
            max_sources: max_sources.max(1),
            language: Language::default(),
        }
    }

    /// Define o idioma dos rótulos
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Interpreta booleano vindo do .env.
///
/// Case-insensitive: "true"/"1"/"yes"/"on" → true, "false"/"0"/"no"/"off" → false.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Carrega configuração a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `FORMATTER_MARKDOWN`: usar markdown (padrão: true)
/// - `FORMATTER_MAX_SOURCES`: máximo de fontes, inteiro positivo (padrão: 5)
/// - `FORMATTER_LANGUAGE`: código do idioma ("en", "ru", "pt")
///
/// # Exemplo
///
/// ```rust,ignore
/// // .env
/// FORMATTER_MARKDOWN=false
/// FORMATTER_LANGUAGE=ru
///
/// let config = load_formatter_config();
/// assert!(!config.use_markdown);
/// ```
pub fn load_formatter_config() -> FormatterConfig {
    apply_overrides(FormatterConfig::default(), |key| std::env::var(key).ok())
}

/// Aplica sobrescritas obtidas por `lookup`. Valores inválidos são ignorados.
pub fn apply_overrides<F>(mut config: FormatterConfig, lookup: F) -> FormatterConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("FORMATTER_MARKDOWN") {
        match parse_bool(&value) {
            Some(use_markdown) => {
                config.use_markdown = use_markdown;
                log::info!("📦 FORMATTER_MARKDOWN={}", use_markdown);
            }
            None => log::warn!("⚠ FORMATTER_MARKDOWN inválido: {:?}", value),
        }
    }

    if let Some(value) = lookup("FORMATTER_MAX_SOURCES") {
        match value.trim().parse::<usize>() {
            Ok(max) if max > 0 => {
                config.max_sources = max;
                log::info!("📦 FORMATTER_MAX_SOURCES={}", max);
            }
            _ => log::warn!("⚠ FORMATTER_MAX_SOURCES inválido: {:?}", value),
        }
    }

    if let Some(value) = lookup("FORMATTER_LANGUAGE") {
        config.language = Language::from_code(&value);
        log::info!("📦 FORMATTER_LANGUAGE={}", config.language);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = FormatterConfig::default();
        assert!(config.use_markdown);
        assert_eq!(config.max_sources, 5);
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_new_clamps_max_sources() {
        assert_eq!(FormatterConfig::new(true, 0).max_sources, 1);
        assert_eq!(FormatterConfig::new(false, 3).max_sources, 3);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_apply_overrides() {
        let config = apply_overrides(
            FormatterConfig::default(),
            lookup_from(&[
                ("FORMATTER_MARKDOWN", "no"),
                ("FORMATTER_MAX_SOURCES", "3"),
                ("FORMATTER_LANGUAGE", "pt"),
            ]),
        );
        assert!(!config.use_markdown);
        assert_eq!(config.max_sources, 3);
        assert_eq!(config.language, Language::Portuguese);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = apply_overrides(
            FormatterConfig::default(),
            lookup_from(&[("FORMATTER_MARKDOWN", "perhaps"), ("FORMATTER_MAX_SOURCES", "0")]),
        );
        assert_eq!(config, FormatterConfig::default());
    }
}
