//! Bordered table output

use crate::error::Result;
use gridsheet_engine::engine::{CellRef, Sheet};
use std::io::Write;
use std::path::Path;

/// Render the sheet as rows of border-delimited cells padded to `width`.
///
/// Numeric cells are right-aligned, everything else left-aligned. Cells wider
/// than `width` are written in full.
pub fn render_table<W: Write>(
    w: &mut W,
    sheet: &Sheet,
    width: usize,
    border: char,
) -> std::io::Result<()> {
    for row in 0..sheet.row_count() {
        for col in 0..sheet.column_count() {
            let cell = CellRef::new(col, row);
            let text = sheet.get(&cell);
            if sheet.is_numeric(&cell) {
                write!(w, "{}{:>width$}", border, text, width = width)?;
            } else {
                write!(w, "{}{:<width$}", border, text, width = width)?;
            }
        }
        writeln!(w, "{}", border)?;
    }
    Ok(())
}

/// Render the sheet into a string.
pub fn render_table_string(sheet: &Sheet, width: usize, border: char) -> String {
    let mut out = Vec::new();
    render_table(&mut out, sheet, width, border).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}

/// Render the sheet into a file, replacing any existing content.
pub fn write_table(path: &Path, sheet: &Sheet, width: usize, border: char) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    render_table(&mut file, sheet, width, border)?;
    file.flush()?;
    tracing::info!(path = %path.display(), "wrote table");
    Ok(())
}
