//! # cellform-dsl
//!
//! Parser and inlining compiler for the cellform formula-definition language.
//!
//! This crate provides:
//! - Expression parsing (text → AST)
//! - Definition tables built from DSL source (`let` constants, `define` formulas)
//! - Compilation by textual inlining (AST → one flat spreadsheet formula)
//! - A diagnostic AST printer
//!
//! The compiler never evaluates anything numerically: it substitutes and
//! inlines text, leaving the arithmetic to the spreadsheet application that
//! ultimately hosts the emitted formula.
//!
//! ## Example
//!
//! ```rust
//! use cellform_dsl::{compile_formula, Definitions};
//!
//! let defs = Definitions::parse("define double(x) = x * 2").unwrap();
//! let formula = compile_formula("double", &["A1".into()], &defs).unwrap();
//! assert_eq!(formula, "=(A1*2)");
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod parser;
pub mod printer;

pub use ast::{BinaryOp, Expr, Formula};
pub use builder::Definitions;
pub use compiler::compile_formula;
pub use error::{DslError, DslResult};
pub use parser::parse_expression;
pub use printer::render_tree;
