//! Fixed-range access to coefficient sheets.
//!
//! Model coefficients live in CSV sheets under the data directory, one sheet
//! per scenario, keeping the same cell layout as the course workbooks. A
//! [`Sheet`] loads the file into a cell grid and reads values back through
//! A1-style addresses ("J13") and ranges ("C5:N5"), so each loader names the
//! exact cells its numbers come from.
//!
//! This is deliberately file-I/O glue: no formulas, no types beyond text and
//! numbers, no workbook semantics.

use std::path::Path;

use crate::error::{Result, SheetError};

/// A loaded sheet: a rectangular grid of trimmed text cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

/// 0-based cell coordinates parsed from an A1 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRef {
    row: usize,
    col: usize,
}

impl Sheet {
    /// Load a CSV sheet. Rows may have ragged lengths; short rows read as
    /// empty cells.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SheetError::NotFound(path.to_path_buf()).into());
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(Self { name, rows })
    }

    #[cfg(test)]
    pub(crate) fn from_rows(name: &str, rows: Vec<Vec<&str>>) -> Self {
        Self {
            name: name.to_string(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of populated rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest populated row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Text of a single cell. Cells outside the populated grid read as empty,
    /// like unvisited cells of a workbook.
    pub fn text(&self, address: &str) -> Result<String> {
        let cell = parse_address(address)?;
        Ok(self.cell(cell).to_string())
    }

    /// Numeric value of a single cell; empty cells are an error.
    pub fn number(&self, address: &str) -> Result<f64> {
        let cell = parse_address(address)?;
        let raw = self.cell(cell);
        if raw.is_empty() {
            return Err(SheetError::EmptyCell {
                sheet: self.name.clone(),
                cell: address.to_string(),
            }
            .into());
        }
        self.parse_number(address, raw)
    }

    /// Numeric value of a single cell, with a default for empty cells.
    pub fn number_or(&self, address: &str, default: f64) -> Result<f64> {
        let cell = parse_address(address)?;
        let raw = self.cell(cell);
        if raw.is_empty() {
            return Ok(default);
        }
        self.parse_number(address, raw)
    }

    /// Numbers of a horizontal range like `"C5:N5"`. Empty cells read as 0.
    pub fn row_numbers(&self, range: &str) -> Result<Vec<f64>> {
        self.line_cells(range, Orientation::Horizontal)?
            .into_iter()
            .map(|(address, raw)| {
                if raw.is_empty() {
                    Ok(0.0)
                } else {
                    self.parse_number(&address, &raw)
                }
            })
            .collect()
    }

    /// Text of a horizontal range.
    pub fn row_text(&self, range: &str) -> Result<Vec<String>> {
        Ok(self
            .line_cells(range, Orientation::Horizontal)?
            .into_iter()
            .map(|(_, raw)| raw)
            .collect())
    }

    /// Numbers of a vertical range like `"K5:K7"`. Empty cells read as 0.
    pub fn column_numbers(&self, range: &str) -> Result<Vec<f64>> {
        self.line_cells(range, Orientation::Vertical)?
            .into_iter()
            .map(|(address, raw)| {
                if raw.is_empty() {
                    Ok(0.0)
                } else {
                    self.parse_number(&address, &raw)
                }
            })
            .collect()
    }

    /// Text of a vertical range like `"B8:B18"`.
    pub fn column_text(&self, range: &str) -> Result<Vec<String>> {
        Ok(self
            .line_cells(range, Orientation::Vertical)?
            .into_iter()
            .map(|(_, raw)| raw)
            .collect())
    }

    /// Numbers of a rectangular range like `"C12:H14"`, row by row.
    /// Empty cells read as 0.
    pub fn grid_numbers(&self, range: &str) -> Result<Vec<Vec<f64>>> {
        let (start, end) = parse_range(range)?;
        let mut grid = Vec::with_capacity(end.row - start.row + 1);
        for row in start.row..=end.row {
            let mut line = Vec::with_capacity(end.col - start.col + 1);
            for col in start.col..=end.col {
                let cell = CellRef { row, col };
                let raw = self.cell(cell);
                if raw.is_empty() {
                    line.push(0.0);
                } else {
                    line.push(self.parse_number(&format_address(cell), raw)?);
                }
            }
            grid.push(line);
        }
        Ok(grid)
    }

    fn cell(&self, cell: CellRef) -> &str {
        self.rows
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn parse_number(&self, address: &str, raw: &str) -> Result<f64> {
        raw.parse::<f64>().map_err(|_| {
            SheetError::NonNumeric {
                sheet: self.name.clone(),
                cell: address.to_string(),
                found: raw.to_string(),
            }
            .into()
        })
    }

    fn line_cells(&self, range: &str, orientation: Orientation) -> Result<Vec<(String, String)>> {
        let (start, end) = parse_range(range)?;
        match orientation {
            Orientation::Horizontal if start.row != end.row => {
                return Err(SheetError::Range {
                    range: range.to_string(),
                    reason: "expected a single-row range",
                }
                .into())
            }
            Orientation::Vertical if start.col != end.col => {
                return Err(SheetError::Range {
                    range: range.to_string(),
                    reason: "expected a single-column range",
                }
                .into())
            }
            _ => {}
        }

        let mut cells = Vec::new();
        for row in start.row..=end.row {
            for col in start.col..=end.col {
                let cell = CellRef { row, col };
                cells.push((format_address(cell), self.cell(cell).to_string()));
            }
        }
        Ok(cells)
    }
}

#[derive(Clone, Copy)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Spreadsheet column label for a 0-based index: 0 -> "A", 27 -> "AB".
pub fn column_label(mut index: usize) -> String {
    let mut label = String::new();
    loop {
        label.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label
}

fn parse_address(address: &str) -> Result<CellRef> {
    let address = address.trim();
    let split = address
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SheetError::Address(address.to_string()))?;
    let (letters, digits) = address.split_at(split);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SheetError::Address(address.to_string()).into());
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits
        .parse()
        .map_err(|_| SheetError::Address(address.to_string()))?;
    if row == 0 {
        return Err(SheetError::Address(address.to_string()).into());
    }

    Ok(CellRef {
        row: row - 1,
        col: col - 1,
    })
}

fn parse_range(range: &str) -> Result<(CellRef, CellRef)> {
    let (start, end) = range.split_once(':').ok_or(SheetError::Range {
        range: range.to_string(),
        reason: "expected 'START:END'",
    })?;
    let start = parse_address(start)?;
    let end = parse_address(end)?;
    if end.row < start.row || end.col < start.col {
        return Err(SheetError::Range {
            range: range.to_string(),
            reason: "end cell lies before start cell",
        }
        .into());
    }
    Ok((start, end))
}

fn format_address(cell: CellRef) -> String {
    format!("{}{}", column_label(cell.col), cell.row + 1)
}
