//! Flat ODF spreadsheet writer
//!
//! Emits a single-file ("flat") OpenDocument spreadsheet. Unlike a packaged
//! `.ods`, nothing is zipped: the document is one XML file carrying the
//! spreadsheet mimetype, which LibreOffice opens directly.

use std::fs;
use std::path::Path;

use quick_xml::escape::escape;

use crate::cell::{Cell, CellKind, Spreadsheet};
use crate::error::FodsResult;

const SHEET_NAME: &str = "Sheet1";

/// Flat ODF file writer
pub struct FodsWriter;

impl FodsWriter {
    /// Write a spreadsheet to a file path
    pub fn write_file<P: AsRef<Path>>(sheet: &Spreadsheet, path: P) -> FodsResult<()> {
        let content = Self::write_to_string(sheet);
        log::debug!(
            "writing {} rows to {}",
            sheet.rows().len(),
            path.as_ref().display()
        );
        fs::write(path, content)?;
        Ok(())
    }

    /// Render a spreadsheet as flat ODF XML
    pub fn write_to_string(sheet: &Spreadsheet) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
    xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0"
    xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"
    xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"
    xmlns:number="urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0"
    xmlns:of="urn:oasis:names:tc:opendocument:xmlns:of:1.2"
    office:version="1.3"
    office:mimetype="application/vnd.oasis.opendocument.spreadsheet">
"#,
        );

        Self::write_styles(&mut content);

        content.push_str("  <office:body>\n    <office:spreadsheet>\n");
        Self::write_table(&mut content, sheet);
        Self::write_named_expressions(&mut content, sheet);
        content.push_str("    </office:spreadsheet>\n  </office:body>\n</office:document>\n");

        content
    }

    /// Data styles for the typed cells (currency and percentage formats)
    fn write_styles(content: &mut String) {
        content.push_str(
            r#"  <office:automatic-styles>
    <number:currency-style style:name="N-currency">
      <number:number number:decimal-places="2" number:min-decimal-places="2" number:min-integer-digits="1"/>
      <number:text> </number:text>
      <number:currency-symbol>&#8364;</number:currency-symbol>
    </number:currency-style>
    <number:percentage-style style:name="N-percentage">
      <number:number number:decimal-places="2" number:min-decimal-places="2" number:min-integer-digits="1"/>
      <number:text>%</number:text>
    </number:percentage-style>
    <style:style style:name="ce-currency" style:family="table-cell" style:data-style-name="N-currency"/>
    <style:style style:name="ce-percentage" style:family="table-cell" style:data-style-name="N-percentage"/>
  </office:automatic-styles>
"#,
        );
    }

    fn write_table(content: &mut String, sheet: &Spreadsheet) {
        content.push_str(&format!(
            "      <table:table table:name=\"{}\">\n",
            escape(SHEET_NAME)
        ));

        for row in sheet.rows() {
            content.push_str("        <table:table-row>\n");
            for cell in row {
                Self::write_cell(content, cell);
            }
            content.push_str("        </table:table-row>\n");
        }

        content.push_str("      </table:table>\n");
    }

    fn write_cell(content: &mut String, cell: &Cell) {
        let value = escape(cell.value.as_str());

        match cell.kind {
            CellKind::Formula => {
                content.push_str(&format!(
                    "          <table:table-cell table:formula=\"of:{value}\"/>\n"
                ));
            }
            CellKind::String => {
                content.push_str(&format!(
                    "          <table:table-cell office:value-type=\"string\">\
<text:p>{value}</text:p></table:table-cell>\n"
                ));
            }
            CellKind::Currency | CellKind::Percentage | CellKind::Float => {
                let style_attr = match cell.kind {
                    CellKind::Currency => " table:style-name=\"ce-currency\"",
                    CellKind::Percentage => " table:style-name=\"ce-percentage\"",
                    _ => "",
                };
                content.push_str(&format!(
                    "          <table:table-cell{style_attr} office:value-type=\"{}\" \
office:value=\"{value}\"><text:p>{value}</text:p></table:table-cell>\n",
                    cell.kind.value_type()
                ));
            }
        }
    }

    /// Named cells become named ranges so formulas can reference them by name
    fn write_named_expressions(content: &mut String, sheet: &Spreadsheet) {
        let named = sheet.named_cells();
        if named.is_empty() {
            return;
        }

        content.push_str("      <table:named-expressions>\n");
        for (name, address) in named {
            // "A1" -> "$Sheet1.$A$1"
            let digits = address.find(|c: char| c.is_ascii_digit()).unwrap_or(0);
            let full = format!(
                "${SHEET_NAME}.${}${}",
                &address[..digits],
                &address[digits..]
            );
            content.push_str(&format!(
                "        <table:named-range table:name=\"{}\" \
table:base-cell-address=\"{full}\" table:cell-range-address=\"{full}\"/>\n",
                escape(name)
            ));
        }
        content.push_str("      </table:named-expressions>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_sheet() -> Spreadsheet {
        Spreadsheet::from_rows(vec![
            vec![Cell::named("222.22", CellKind::Currency, "PRICE")],
            vec![Cell::named("0.4223", CellKind::Percentage, "DISCOUNT")],
            vec![Cell::new("=(PRICE*(1-DISCOUNT))", CellKind::Formula)],
        ])
    }

    #[test]
    fn test_document_carries_flat_ods_mimetype() {
        let xml = FodsWriter::write_to_string(&sample_sheet());
        assert!(xml.contains("office:mimetype=\"application/vnd.oasis.opendocument.spreadsheet\""));
        assert!(xml.contains("<office:spreadsheet>"));
    }

    #[test]
    fn test_typed_cells_are_written() {
        let xml = FodsWriter::write_to_string(&sample_sheet());
        assert!(xml.contains(
            "<table:table-cell table:style-name=\"ce-currency\" \
office:value-type=\"currency\" office:value=\"222.22\">"
        ));
        assert!(xml.contains(
            "<table:table-cell table:style-name=\"ce-percentage\" \
office:value-type=\"percentage\" office:value=\"0.4223\">"
        ));
    }

    #[test]
    fn test_formula_cell_uses_of_namespace() {
        let xml = FodsWriter::write_to_string(&sample_sheet());
        assert!(xml.contains("table:formula=\"of:=(PRICE*(1-DISCOUNT))\""));
    }

    #[test]
    fn test_named_ranges_are_emitted() {
        let xml = FodsWriter::write_to_string(&sample_sheet());
        assert!(xml.contains(
            "<table:named-range table:name=\"PRICE\" \
table:base-cell-address=\"$Sheet1.$A$1\" table:cell-range-address=\"$Sheet1.$A$1\"/>"
        ));
        assert!(xml.contains("table:name=\"DISCOUNT\""));
    }

    #[test]
    fn test_no_named_expressions_block_without_named_cells() {
        let sheet = Spreadsheet::from_rows(vec![vec![Cell::new("1", CellKind::Float)]]);
        let xml = FodsWriter::write_to_string(&sheet);
        assert!(!xml.contains("table:named-expressions"));
    }

    #[test]
    fn test_string_cells_are_escaped() {
        let sheet = Spreadsheet::from_rows(vec![vec![Cell::new(
            "a < b & c",
            CellKind::String,
        )]]);
        let xml = FodsWriter::write_to_string(&sheet);
        assert!(xml.contains("<text:p>a &lt; b &amp; c</text:p>"));
    }

    #[test]
    fn test_row_and_cell_counts() {
        let sheet = sample_sheet();
        let xml = FodsWriter::write_to_string(&sheet);
        assert_eq!(xml.matches("<table:table-row>").count(), 3);
        assert_eq!(xml.matches("<table:table-cell").count(), 3);
    }
}
