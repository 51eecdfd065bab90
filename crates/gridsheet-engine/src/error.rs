//! Error types for the gridsheet engine.

use thiserror::Error;

use crate::engine::CellRef;

/// Errors raised by the engine.
///
/// `CircularDependency` and `PropagatedFailure` never escape
/// [`evaluate_all`](crate::engine::evaluate_all); they are converted into
/// quarantine entries and collected in the pass report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid cell reference format: {0}")]
    InvalidReferenceFormat(String),

    #[error("Column index cannot be negative: {0}")]
    NegativeColumn(i64),

    #[error("Circular dependency detected at {cell}")]
    CircularDependency { cell: CellRef, path: Vec<CellRef> },

    #[error("Cannot evaluate {cell}: it references quarantined cell {dependency}")]
    PropagatedFailure { cell: CellRef, dependency: CellRef },

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
}

impl EngineError {
    /// The coordinate a resolution failure quarantines, if any.
    pub fn cell(&self) -> Option<&CellRef> {
        match self {
            EngineError::CircularDependency { cell, .. }
            | EngineError::PropagatedFailure { cell, .. } => Some(cell),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
