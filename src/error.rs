// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("CBOR encode error: {0}")]
    Serialization(String),
    #[error("CBOR decode error: {0}")]
    Deserialization(String),
}

pub type Result<T> = std::result::Result<T, ArrError>;
