//! Erros da superfície externa (leitura e decodificação de payloads).
//!
//! A formatação em si nunca falha; só a entrada bruta pode.

/// Erro ao obter um payload de resposta
#[derive(Debug, thiserror::Error)]
pub enum FormatterError {
    /// JSON malformado ou de tipo inesperado na raiz.
    #[error("Invalid response payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Falha de leitura da entrada.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Payload precisa ser um objeto JSON.
    #[error("Response payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
