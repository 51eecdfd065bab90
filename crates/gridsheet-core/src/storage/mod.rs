//! Storage module for CSV ingestion and bordered-table output

mod csv;
mod table;

pub use csv::{parse_csv_str, read_csv};
pub use table::{render_table, render_table_string, write_table};
