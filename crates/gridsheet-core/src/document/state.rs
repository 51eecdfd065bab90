use crate::error::Result;
use crate::storage::parse_csv_str;
use gridsheet_engine::engine::{CellRef, EvalReport, Sheet, evaluate_all};
use std::path::PathBuf;

/// How a document reads its input and draws its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Field separator for CSV input.
    pub delimiter: char,
    /// Character drawn between and around cells.
    pub border: char,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            border: '|',
        }
    }
}

/// A sheet together with where it came from and how to draw it.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub sheet: Sheet,
    /// File the sheet was loaded from, if any
    pub source: Option<PathBuf>,
    pub options: DocumentOptions,
    /// Whether an evaluation pass has run since the last load
    pub evaluated: bool,
}

impl Document {
    /// Create an empty document.
    pub fn new(options: DocumentOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a document from CSV text.
    pub fn from_csv_str(content: &str, options: DocumentOptions) -> Result<Self> {
        let sheet = parse_csv_str(content, options.delimiter)?;
        Ok(Self {
            sheet,
            options,
            ..Self::default()
        })
    }

    /// Text of the cell named by an A1 reference such as `"B3"`.
    pub fn get(&self, reference: &str) -> Result<&str> {
        let cell: CellRef = reference.parse()?;
        Ok(self.sheet.get(&cell))
    }

    /// Resolve every formula cell and expand horizontal rules.
    pub fn evaluate(&mut self) -> EvalReport {
        let report = evaluate_all(&mut self.sheet);
        self.evaluated = true;
        report
    }
}
