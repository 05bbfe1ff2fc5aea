#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed card document: {0}")]
    MalformedDocument(String),

    #[error("catalog API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
