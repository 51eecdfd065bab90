use super::{Document, DocumentOptions};
use crate::error::{Result, SheetError};
use crate::storage::{read_csv, render_table, render_table_string, write_table};
use std::io::Write;
use std::path::Path;

impl Document {
    /// Load a document from a CSV file.
    pub fn open(path: &Path, options: DocumentOptions) -> Result<Self> {
        let sheet = read_csv(path, options.delimiter)?;
        Ok(Self {
            sheet,
            source: Some(path.to_path_buf()),
            options,
            evaluated: false,
        })
    }

    /// Re-read the sheet from its source file, dropping computed values
    /// and quarantine state.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = &self.source else {
            return Err(SheetError::NoInputPath);
        };

        // Parse first so a failed read leaves the current sheet intact.
        self.sheet = read_csv(path, self.options.delimiter)?;
        self.evaluated = false;
        Ok(())
    }

    /// Render the sheet as a bordered table.
    pub fn render(&mut self) -> String {
        let width = self.sheet.field_width();
        render_table_string(&self.sheet, width, self.options.border)
    }

    /// Write the bordered table to `w`.
    pub fn print<W: Write>(&mut self, w: &mut W) -> Result<()> {
        let width = self.sheet.field_width();
        render_table(w, &self.sheet, width, self.options.border)?;
        w.flush()?;
        Ok(())
    }

    /// Write the bordered table to a file.
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        let width = self.sheet.field_width();
        write_table(path, &self.sheet, width, self.options.border)
    }
}
