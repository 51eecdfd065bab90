//! gridsheet_engine - Formula recognition and dependency resolution for text grids.

pub mod engine;
pub mod error;

pub use error::{EngineError, Result};
