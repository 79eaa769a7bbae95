// error.rs - Universe construction and pattern lookup errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("universe needs at least one row and one column (got {width}x{height})")]
    EmptyDimension { width: usize, height: usize },
    #[error("universe of {width}x{height} has too many cells")]
    TooLarge { width: usize, height: usize },
    #[error("failed to start the row scheduler")]
    Runtime(#[source] std::io::Error),
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
}
