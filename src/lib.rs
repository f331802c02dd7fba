//! # RAG Formatter
//!
//! Camada final de um sistema de perguntas e respostas com RAG
//! (Retrieval-Augmented Generation): recebe o que o pipeline já produziu e
//! monta o texto exibido ao usuário.
//!
//! ## O que este crate faz
//!
//! 1. Monta a resposta em seções: Resposta → Explicação → Fontes → Confiança
//! 2. Limpa e trunca trechos citados das fontes (300 caracteres)
//! 3. Calcula um nível de confiança a partir dos scores de recuperação
//! 4. Gera resumos curtos e extrai pontos-chave de explicações
//!
//! Ingestão de PDF, chunking, busca híbrida e geração da resposta ficam fora
//! daqui: este crate só consome os resultados deles.
//!
//! ## Exemplo de Uso
//!
//! ```rust,ignore
//! use rag_formatter::prelude::*;
//!
//! let formatter = ResponseFormatter::new(FormatterConfig::default());
//! let confidence = formatter.calculate_confidence(&[0.62, 0.58], None);
//! let sources = vec![SourceCitation::new("Annual Report 2023").with_page(12)];
//! println!("{}", formatter.format("Revenue grew 8%.", "", &sources, &confidence));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos de valor compartilhados.
///
/// - [`Language`]: Idioma da tabela de rótulos
/// - [`SourceCitation`]: Citação de uma fonte recuperada
/// - [`ConfidenceAssessment`]: Nível, score e explicação de confiança
pub mod types;

/// Configuração do formatter (markdown, máximo de fontes, idioma).
///
/// Variáveis de ambiente:
/// - `FORMATTER_MARKDOWN`: usar markdown (padrão: true)
/// - `FORMATTER_MAX_SOURCES`: máximo de fontes (padrão: 5)
/// - `FORMATTER_LANGUAGE`: idioma dos rótulos (padrão: "en")
pub mod config;

/// Erros da leitura de payloads.
pub mod error;

/// Decodificação tolerante do mapeamento de resposta.
pub mod payload;

/// Formatador de respostas, heurística de confiança e rótulos por idioma.
pub mod formatter;

/// Utilitários de texto (limpeza de citações, pontos-chave).
pub mod utils;

// Re-exports principais
pub use config::{load_formatter_config, FormatterConfig};
pub use error::FormatterError;
pub use formatter::{
    calculate_confidence, group_sources_by_document, DocumentSources, ResponseFormatter,
    SectionLabels, StructuredResponse,
};
pub use payload::ResponsePayload;
pub use types::*;

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// ```rust,ignore
/// use rag_formatter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FormatterConfig;
    pub use crate::formatter::{calculate_confidence, ResponseFormatter, StructuredResponse};
    pub use crate::payload::ResponsePayload;
    pub use crate::types::*;
}
