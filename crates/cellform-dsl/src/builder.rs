//! Definition table builder
//!
//! Line-oriented scanner over DSL source text that populates the constant
//! and formula tables. Formula bodies are handed to the expression parser;
//! constant values are deliberately kept as raw, unparsed text and
//! substituted verbatim at compile time.

use ahash::AHashMap;

use crate::ast::Formula;
use crate::error::{DslError, DslResult};
use crate::parser::parse_expression;

const COMMENT_MARKER: &str = "//";
const LET_KEYWORD: &str = "let ";
const DEFINE_KEYWORD: &str = "define ";

/// Frozen constant and formula tables built from DSL source
///
/// Both tables must be fully populated before any compilation, since a
/// formula body may call a formula defined later in the source. There is no
/// mutation API beyond [`Definitions::parse`]; lookups only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    constants: AHashMap<String, String>,
    formulas: AHashMap<String, Formula>,
}

impl Definitions {
    /// Build definition tables from DSL source text
    ///
    /// Recognized lines:
    /// - `let NAME = TEXT` — constant; the right-hand side is stored raw
    /// - `define NAME(PARAM, ...) = EXPR` — formula; the body is parsed
    /// - blank lines and `//` comments are skipped
    ///
    /// Redefining a name silently overwrites the previous entry.
    pub fn parse(source: &str) -> DslResult<Self> {
        let mut defs = Definitions::default();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }

            if let Some(rest) = line.strip_prefix(LET_KEYWORD) {
                defs.add_constant(rest)?;
            } else if let Some(rest) = line.strip_prefix(DEFINE_KEYWORD) {
                defs.add_formula(rest)?;
            }
        }

        Ok(defs)
    }

    fn add_constant(&mut self, rest: &str) -> DslResult<()> {
        let (name, value) = rest
            .split_once('=')
            .ok_or_else(|| DslError::Syntax(format!("Missing '=' in 'let {rest}'")))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DslError::Syntax(format!(
                "Missing constant name in 'let {rest}'"
            )));
        }

        let prior = self
            .constants
            .insert(name.to_string(), value.trim().to_string());
        if prior.is_some() {
            log::warn!("constant '{name}' redefined, previous value discarded");
        }
        Ok(())
    }

    fn add_formula(&mut self, rest: &str) -> DslResult<()> {
        let (signature, body) = rest
            .split_once('=')
            .ok_or_else(|| DslError::Syntax(format!("Missing '=' in 'define {rest}'")))?;

        let signature = signature.trim();
        let open = signature.find('(').ok_or_else(|| {
            DslError::Syntax(format!("Missing '(' in signature '{signature}'"))
        })?;
        let close = signature.find(')').ok_or_else(|| {
            DslError::Syntax(format!("Missing ')' in signature '{signature}'"))
        })?;
        if close < open {
            return Err(DslError::Syntax(format!(
                "Malformed signature '{signature}'"
            )));
        }

        let name = signature[..open].trim();
        if name.is_empty() {
            return Err(DslError::Syntax(format!(
                "Missing formula name in signature '{signature}'"
            )));
        }

        let interior = signature[open + 1..close].trim();
        let params: Vec<String> = if interior.is_empty() {
            Vec::new()
        } else {
            interior.split(',').map(|p| p.trim().to_string()).collect()
        };

        let body = parse_expression(body.trim())?;

        let prior = self
            .formulas
            .insert(name.to_string(), Formula { params, body });
        if prior.is_some() {
            log::warn!("formula '{name}' redefined, previous definition discarded");
        }
        Ok(())
    }

    /// Look up a constant's raw text value
    pub fn constant(&self, name: &str) -> Option<&str> {
        self.constants.get(name).map(String::as_str)
    }

    /// Look up a formula definition
    pub fn formula(&self, name: &str) -> Option<&Formula> {
        self.formulas.get(name)
    }

    /// Iterate over all constants (unspecified order)
    pub fn constants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constants
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate over all formulas (unspecified order)
    pub fn formulas(&self) -> impl Iterator<Item = (&str, &Formula)> {
        self.formulas.iter().map(|(name, f)| (name.as_str(), f))
    }
}
