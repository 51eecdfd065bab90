//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ column/row indices)
//! - [`Formula`], [`Operator`] - Structured form of a `#(op A1 B2 ...)` cell
//! - [`recognize`], [`is_formula`] - Formula recognition with lenient operand parsing
//! - [`Sheet`] - Column-major auto-growing text store with formula and quarantine tables
//! - [`evaluate_all`], [`Resolver`] - Dependency resolution with cycle quarantine
//! - [`reduce`] - Numeric folds backing each operator
//! - [`format_number`], [`parse_number`] - Numeric text conventions shared with rendering

mod cell_ref;
mod format;
mod formula;
mod reduce;
mod resolve;
mod sheet;

pub use cell_ref::CellRef;
pub use format::{format_number, is_numeric, parse_number};
pub use formula::{Formula, Operator, Recognition, SkippedToken, is_formula, recognize};
pub use reduce::reduce;
pub use resolve::{EvalReport, Resolver, evaluate_all};
pub use sheet::{HR_FILL, HR_MARKER, Sheet};
