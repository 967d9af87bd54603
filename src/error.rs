use rmcp::ErrorData as McpError;

/// Conditions surfaced to the user as alerts rather than failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Digite o nome da cidade")]
    EmptyCityName,
    #[error("Cidade não encontrada. Tente outro nome.")]
    CityNotFound(String),
    #[error("Cidade desconhecida: {0}")]
    UnknownCity(String),
    #[error("Nenhuma cidade com id {0}")]
    UnknownCityId(i64),
    #[error("Por favor, digite seu nome")]
    EmptyUserName,
}

/// Key-value store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Map a failed operation onto an MCP error. User-facing conditions become
/// invalid params; anything else is an internal error prefixed with `alert`.
pub fn to_mcp_error(err: anyhow::Error, alert: &str) -> McpError {
    match err.downcast_ref::<AppError>() {
        Some(app) => McpError::invalid_params(app.to_string(), None),
        None => McpError::internal_error(format!("{}: {:#}", alert, err), None),
    }
}
