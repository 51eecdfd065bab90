//! gridsheet-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{Document, DocumentOptions};
pub use error::{Result, SheetError};

pub use gridsheet_engine::engine::{CellRef, EvalReport, Sheet};
