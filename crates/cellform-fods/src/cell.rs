//! Typed cell descriptors and spreadsheet assembly

use std::str::FromStr;

use crate::error::FodsError;

/// Value type tag controlling how a cell is written into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Currency amount, formatted with a currency data style
    Currency,
    /// Fraction formatted as a percentage
    Percentage,
    /// Plain floating point number
    Float,
    /// Text cell
    String,
    /// Computed cell; the value is a formula string starting with `=`
    Formula,
}

impl CellKind {
    /// The ODF `office:value-type` attribute value for this kind
    pub fn value_type(self) -> &'static str {
        match self {
            CellKind::Currency => "currency",
            CellKind::Percentage => "percentage",
            CellKind::Float => "float",
            CellKind::String => "string",
            CellKind::Formula => "float",
        }
    }
}

impl FromStr for CellKind {
    type Err = FodsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency" => Ok(CellKind::Currency),
            "percentage" => Ok(CellKind::Percentage),
            "float" => Ok(CellKind::Float),
            "string" => Ok(CellKind::String),
            "formula" => Ok(CellKind::Formula),
            other => Err(FodsError::UnknownCellKind(other.to_string())),
        }
    }
}

/// A single cell: raw value text, a value type tag, and an optional name
///
/// A named cell is registered as a named expression in the written document,
/// so formulas can reference it by name instead of by address.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: String,
    pub kind: CellKind,
    pub name: Option<String>,
}

impl Cell {
    /// Create an anonymous cell
    pub fn new<S: Into<String>>(value: S, kind: CellKind) -> Self {
        Cell {
            value: value.into(),
            kind,
            name: None,
        }
    }

    /// Create a named cell
    pub fn named<S: Into<String>, N: Into<String>>(value: S, kind: CellKind, name: N) -> Self {
        Cell {
            value: value.into(),
            kind,
            name: Some(name.into()),
        }
    }
}

/// An assembled sheet: rows of cells
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    rows: Vec<Vec<Cell>>,
}

impl Spreadsheet {
    /// Create an empty spreadsheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spreadsheet from rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Spreadsheet { rows }
    }

    /// Append a row of cells
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// All rows, in sheet order
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Named cells with their A1-style addresses, in sheet order
    pub fn named_cells(&self) -> Vec<(&str, String)> {
        let mut named = Vec::new();
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if let Some(name) = &cell.name {
                    named.push((name.as_str(), cell_address(row_idx, col_idx)));
                }
            }
        }
        named
    }
}

/// A1-style address for a 0-based row/column pair
pub(crate) fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", column_name(col), row + 1)
}

/// Spreadsheet column name for a 0-based index (A, B, ..., Z, AA, ...)
fn column_name(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
    }

    #[test]
    fn test_cell_addresses() {
        assert_eq!(cell_address(0, 0), "A1");
        assert_eq!(cell_address(2, 1), "B3");
    }

    #[test]
    fn test_named_cells_in_sheet_order() {
        let sheet = Spreadsheet::from_rows(vec![
            vec![Cell::named("222.22", CellKind::Currency, "PRICE")],
            vec![Cell::new("n/a", CellKind::String)],
            vec![Cell::named("0.42", CellKind::Percentage, "DISCOUNT")],
        ]);

        assert_eq!(
            sheet.named_cells(),
            vec![("PRICE", "A1".to_string()), ("DISCOUNT", "A3".to_string())]
        );
    }

    #[test]
    fn test_cell_kind_from_str() {
        assert_eq!("currency".parse::<CellKind>().unwrap(), CellKind::Currency);
        assert_eq!(
            "percentage".parse::<CellKind>().unwrap(),
            CellKind::Percentage
        );
        assert!(matches!(
            "money".parse::<CellKind>(),
            Err(FodsError::UnknownCellKind(k)) if k == "money"
        ));
    }
}
