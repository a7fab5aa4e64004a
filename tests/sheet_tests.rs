//! Coefficient sheet reading against real files on disk.

use std::fs;

use orlab::error::{Error, SheetError};
use orlab::sheet::Sheet;
use tempfile::TempDir;

fn write_sheet(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write sheet");
    path
}

#[test]
fn reads_cells_by_a1_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "mix.csv", "title,\n,profit\nx,3\ny,5\n");
    let sheet = Sheet::open(path).unwrap();

    assert_eq!(sheet.text("A1").unwrap(), "title");
    assert_eq!(sheet.text("B2").unwrap(), "profit");
    assert!((sheet.number("B3").unwrap() - 3.0).abs() < 1e-9);
    assert!((sheet.number("B4").unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn ragged_rows_read_as_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "ragged.csv", "a\n,b,7\n");
    let sheet = Sheet::open(path).unwrap();

    assert_eq!(sheet.text("C1").unwrap(), "");
    assert!((sheet.number_or("C1", 1.5).unwrap() - 1.5).abs() < 1e-9);
    assert!((sheet.number("C2").unwrap() - 7.0).abs() < 1e-9);
}

#[test]
fn missing_file_is_a_not_found_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Sheet::open(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, Error::Sheet(SheetError::NotFound(_))));
}

#[test]
fn non_numeric_cell_names_the_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "bad.csv", "x,oops\n");
    let sheet = Sheet::open(path).unwrap();

    let err = sheet.number("B1").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("B1"), "unexpected message: {message}");
    assert!(message.contains("oops"), "unexpected message: {message}");
}

#[test]
fn range_reads_cover_rows_columns_and_grids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "table.csv", ",c1,c2\nr1,1,2\nr2,3,4\n");
    let sheet = Sheet::open(path).unwrap();

    assert_eq!(sheet.row_text("B1:C1").unwrap(), vec!["c1", "c2"]);
    assert_eq!(sheet.column_text("A2:A3").unwrap(), vec!["r1", "r2"]);
    assert_eq!(
        sheet.grid_numbers("B2:C3").unwrap(),
        vec![vec![1.0, 2.0], vec![3.0, 4.0]]
    );
}
