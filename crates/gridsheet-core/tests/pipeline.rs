//! Load, evaluate and render whole files.

use gridsheet_core::{CellRef, Document, DocumentOptions, SheetError};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn names(cells: &[CellRef]) -> Vec<String> {
    cells.iter().map(CellRef::to_string).collect()
}

#[test]
fn test_budget_end_to_end() {
    let mut doc = Document::open(&fixture("budget.csv"), DocumentOptions::default()).unwrap();

    let report = doc.evaluate();

    let evaluated: Vec<CellRef> = report.evaluated.iter().map(|(c, _)| c.clone()).collect();
    assert_eq!(names(&evaluated), vec!["D3", "D4", "B6", "C6", "D6"]);
    let failed: Vec<CellRef> = report
        .failures
        .iter()
        .filter_map(|e| e.cell().cloned())
        .collect();
    assert_eq!(names(&failed), vec!["B7", "C7", "D7"]);
    assert!(report.skipped.is_empty());
    assert_eq!(report.field_width, 12);

    let expected = std::fs::read_to_string(fixture("budget.expected.txt")).unwrap();
    assert_eq!(doc.render(), expected);
}

#[test]
fn test_budget_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("budget.txt");
    let mut doc = Document::open(&fixture("budget.csv"), DocumentOptions::default()).unwrap();
    doc.evaluate();

    doc.write_to(&out).unwrap();

    let expected = std::fs::read_to_string(fixture("budget.expected.txt")).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), expected);
}

#[test]
fn test_quarantined_cells_keep_their_text() {
    let mut doc = Document::open(&fixture("budget.csv"), DocumentOptions::default()).unwrap();
    doc.evaluate();

    assert_eq!(doc.get("B7").unwrap(), "#(sum C7)");
    assert_eq!(doc.get("C7").unwrap(), "#(sum B7)");
    assert_eq!(doc.get("D7").unwrap(), "#(sum D6 C7)");
    assert!(doc.sheet.is_quarantined(&CellRef::parse_a1("D7").unwrap()));
    assert!(!doc.sheet.is_quarantined(&CellRef::parse_a1("D6").unwrap()));
}

#[test]
fn test_semicolon_input_with_custom_border() {
    let options = DocumentOptions {
        delimiter: ';',
        border: '#',
    };
    let mut doc = Document::from_csv_str("x;1,5\n#(sum B1 B1);\"a;b\"\n", options).unwrap();
    doc.evaluate();

    assert_eq!(doc.render(), "#x  #1,5#\n#0.0#a;b#\n");
}

#[test]
fn test_blank_fields_and_lines_are_rendered() {
    let mut doc = Document::from_csv_str("ab, ,\n7\n\n", DocumentOptions::default()).unwrap();
    doc.evaluate();

    assert_eq!(doc.render(), "|ab|  |\n| 7|  |\n|  |  |\n");
}

#[test]
fn test_unterminated_quote_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "ok\n\"broken\n").unwrap();

    match Document::open(&path, DocumentOptions::default()) {
        Err(SheetError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_file_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let mut doc = Document::open(&path, DocumentOptions::default()).unwrap();
    let report = doc.evaluate();

    assert_eq!(report.field_width, 0);
    assert_eq!(doc.render(), "");
}
