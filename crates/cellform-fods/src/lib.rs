//! # cellform-fods
//!
//! Flat ODF spreadsheet (`.fods`) assembly and writing.
//!
//! This crate provides:
//! - [`Cell`] - typed cell descriptors (currency, percentage, formula, ...)
//! - [`Spreadsheet`] - rows of cells with A1-style addressing and named cells
//! - [`FodsWriter`] - single-file OpenDocument spreadsheet output
//!
//! A flat ODF document is the XML an `.ods` package would split across
//! `content.xml` and `styles.xml`, merged into one file that LibreOffice
//! opens directly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cellform_fods::{Cell, CellKind, FodsWriter, Spreadsheet};
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.push_row(vec![Cell::named("222.22", CellKind::Currency, "PRICE")]);
//! sheet.push_row(vec![Cell::new("=(PRICE*2)", CellKind::Formula)]);
//! FodsWriter::write_file(&sheet, "out.fods")?;
//! ```

pub mod cell;
pub mod error;
pub mod writer;

pub use cell::{Cell, CellKind, Spreadsheet};
pub use error::{FodsError, FodsResult};
pub use writer::FodsWriter;
