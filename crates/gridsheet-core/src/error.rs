//! Error types for gridsheet core.

use thiserror::Error;

use gridsheet_engine::EngineError;

/// Errors that can occur while loading, evaluating or writing a sheet.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("No input path set")]
    NoInputPath,
}

pub type Result<T> = std::result::Result<T, SheetError>;
