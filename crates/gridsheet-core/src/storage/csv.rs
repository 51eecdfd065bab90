//! CSV ingestion

use crate::error::{Result, SheetError};
use gridsheet_engine::engine::{CellRef, Sheet, is_formula};
use std::path::Path;

/// Read a delimited text file into a sheet.
pub fn read_csv(path: &Path, delimiter: char) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    let sheet = parse_csv_str(&content, delimiter)?;
    tracing::info!(
        path = %path.display(),
        columns = sheet.column_count(),
        rows = sheet.row_count(),
        formulas = sheet.formula_count(),
        "loaded sheet"
    );
    Ok(sheet)
}

/// Parse delimited text into a sheet.
///
/// Line `n`, field `m` lands at column `m`, row `n`. Every field is written,
/// including blank ones, so `a, ,` spans two columns and a blank line still
/// occupies a row. Fields that are formulas are also recorded in the sheet's
/// formula table.
pub fn parse_csv_str(content: &str, delimiter: char) -> Result<Sheet> {
    let mut sheet = Sheet::new();

    for (row_idx, line) in content.lines().enumerate() {
        let fields = parse_csv_line(line, delimiter).ok_or_else(|| SheetError::Parse {
            line: row_idx + 1,
            message: "Unterminated quoted field".to_string(),
        })?;

        for (col_idx, field) in fields.into_iter().enumerate() {
            let cell_ref = CellRef::new(col_idx, row_idx);
            if is_formula(&field) {
                sheet.cache_formula(cell_ref.clone(), field.clone());
            }
            sheet.set(&cell_ref, field);
        }
    }

    Ok(sheet)
}

/// Parse a single CSV line, handling quoted fields.
///
/// Trailing fields with no characters at all are dropped (`a,b,,` has two
/// fields); a blank line has one empty field.
/// Returns None if a quoted field is not closed before the end of the line.
pub(crate) fn parse_csv_line(line: &str, delimiter: char) -> Option<Vec<String>> {
    if line.is_empty() {
        return Some(vec![String::new()]);
    }

    let mut fields = Vec::new();
    // Number of leading fields up to the last one with any raw content.
    let mut kept = 0;
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
            field_was_quoted = true;
        } else if c == delimiter {
            if field_was_quoted || !current.is_empty() {
                kept = fields.len() + 1;
            }
            fields.push(finish_field(&mut current, field_was_quoted));
            field_was_quoted = false;
        } else {
            current.push(c);
        }
    }

    if in_quotes {
        return None;
    }
    if field_was_quoted || !current.is_empty() {
        kept = fields.len() + 1;
    }
    fields.push(finish_field(&mut current, field_was_quoted));
    fields.truncate(kept);
    Some(fields)
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = std::mem::take(current);
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}
