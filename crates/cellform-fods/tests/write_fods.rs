//! Tests for writing flat ODF files to disk

use cellform_fods::{Cell, CellKind, FodsWriter, Spreadsheet};

#[test]
fn written_file_round_trips_through_the_filesystem() {
    let sheet = Spreadsheet::from_rows(vec![
        vec![Cell::named("222.22", CellKind::Currency, "PRICE")],
        vec![Cell::named("0.4223", CellKind::Percentage, "DISCOUNT")],
        vec![Cell::new("=(PRICE*(1-DISCOUNT))", CellKind::Formula)],
    ]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.fods");

    FodsWriter::write_file(&sheet, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, FodsWriter::write_to_string(&sheet));
    assert!(written.starts_with("<?xml"));
    assert!(written.trim_end().ends_with("</office:document>"));
}

#[test]
fn write_file_reports_io_errors() {
    let sheet = Spreadsheet::new();
    let err = FodsWriter::write_file(&sheet, "/nonexistent-dir/out.fods").unwrap_err();
    assert!(matches!(err, cellform_fods::FodsError::Io(_)));
}
