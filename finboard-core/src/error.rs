use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("series of {requested} points exceeds the limit of {max}")]
    SeriesTooLong { requested: usize, max: usize },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("unknown {kind} tag '{value}'")]
    UnknownTag { kind: &'static str, value: String },
}
