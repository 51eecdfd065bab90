//! Sparse, auto-growing grid storage.
//!
//! Cells are stored column-major as text. Reads outside the written area
//! return the empty string; writes grow the backing columns as needed.
//! Alongside the text the sheet keeps:
//!
//! - the raw text of every formula cell, recorded at ingestion time
//! - the set of quarantined cells (circular or poisoned dependencies)
//! - the global field width, computed once and then reused

use indexmap::{IndexMap, IndexSet};

use super::{CellRef, is_numeric};

/// Cell literal replaced by a horizontal rule after evaluation.
pub const HR_MARKER: &str = "#hl";

/// Character a horizontal rule is drawn with.
pub const HR_FILL: char = '-';

#[derive(Clone, Debug, Default)]
pub struct Sheet {
    columns: Vec<Vec<String>>,
    formulas: IndexMap<CellRef, String>,
    quarantined: IndexSet<CellRef>,
    field_width: Option<usize>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty column.
    pub fn add_column(&mut self) {
        self.columns.push(Vec::new());
    }

    /// Number of columns, including empty ones.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Text at `cell`, or `""` if it was never written.
    pub fn get(&self, cell: &CellRef) -> &str {
        self.columns
            .get(cell.col)
            .and_then(|column| column.get(cell.row))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Write text at `cell`, growing the grid to make it addressable.
    pub fn set(&mut self, cell: &CellRef, value: impl Into<String>) {
        while self.columns.len() <= cell.col {
            self.add_column();
        }
        let column = &mut self.columns[cell.col];
        if column.len() <= cell.row {
            column.resize(cell.row + 1, String::new());
        }
        column[cell.row] = value.into();
    }

    /// Whether the text at `cell` reads as a number.
    pub fn is_numeric(&self, cell: &CellRef) -> bool {
        is_numeric(self.get(cell))
    }

    /// Record the raw formula text of a cell.
    pub fn cache_formula(&mut self, cell: CellRef, text: impl Into<String>) {
        self.formulas.insert(cell, text.into());
    }

    /// Raw formula text recorded for `cell`.
    pub fn formula(&self, cell: &CellRef) -> Option<&str> {
        self.formulas.get(cell).map(String::as_str)
    }

    /// Formula cells with their raw text, in the order they were recorded.
    pub fn formulas(&self) -> impl Iterator<Item = (&CellRef, &str)> {
        self.formulas.iter().map(|(cell, text)| (cell, text.as_str()))
    }

    pub fn formula_count(&self) -> usize {
        self.formulas.len()
    }

    /// Quarantine `cell`. Returns false if it was already quarantined.
    pub fn quarantine(&mut self, cell: CellRef) -> bool {
        self.quarantined.insert(cell)
    }

    pub fn is_quarantined(&self, cell: &CellRef) -> bool {
        self.quarantined.contains(cell)
    }

    /// Quarantined cells in the order they were quarantined.
    pub fn quarantined(&self) -> impl Iterator<Item = &CellRef> {
        self.quarantined.iter()
    }

    /// Longest cell text, in characters. `0` for an empty sheet.
    pub fn compute_width(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// The global field width, computed on first use and cached.
    ///
    /// Later writes do not update the cached value; call
    /// [`Sheet::refresh_field_width`] or [`Sheet::invalidate_field_width`].
    pub fn field_width(&mut self) -> usize {
        match self.field_width {
            Some(width) => width,
            None => self.refresh_field_width(),
        }
    }

    /// Recompute and cache the field width.
    pub fn refresh_field_width(&mut self) -> usize {
        let width = self.compute_width();
        self.field_width = Some(width);
        width
    }

    pub fn invalidate_field_width(&mut self) {
        self.field_width = None;
    }

    /// Replace every [`HR_MARKER`] cell with a rule as wide as the field width.
    /// Returns the number of cells replaced.
    pub fn finalize_horizontal_rules(&mut self) -> usize {
        let width = self.field_width();
        let rule: String = std::iter::repeat_n(HR_FILL, width).collect();
        let mut replaced = 0;
        for text in self.columns.iter_mut().flatten() {
            if text.as_str() == HR_MARKER {
                text.clone_from(&rule);
                replaced += 1;
            }
        }
        replaced
    }
}
