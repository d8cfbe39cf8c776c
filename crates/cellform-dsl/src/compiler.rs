//! Compiler / inliner
//!
//! Lowers a parsed formula body to one flat infix expression by textual
//! substitution. Nested formula calls are expanded in place, never
//! evaluated: the output is text for a spreadsheet to compute, division
//! stays a textual `/`.

use ahash::AHashMap;

use crate::ast::{Expr, Formula};
use crate::builder::Definitions;
use crate::error::{DslError, DslResult};

/// Expansion depth limit; exceeding it means a formula calls itself,
/// directly or mutually
const MAX_EXPANSION_DEPTH: usize = 64;

/// Environment chain active during one compilation
///
/// A parent-pointer scope chain: lookup checks the local bindings first and
/// walks outward. Each call expansion gets a fresh child scope, so no
/// sibling or parent call ever observes another call's bindings.
#[derive(Debug, Default)]
struct Scope<'a> {
    bindings: AHashMap<String, String>,
    parent: Option<&'a Scope<'a>>,
}

impl Scope<'_> {
    fn root(bindings: AHashMap<String, String>) -> Self {
        Scope {
            bindings,
            parent: None,
        }
    }

    fn child(&self, bindings: AHashMap<String, String>) -> Scope<'_> {
        Scope {
            bindings,
            parent: Some(self),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Some(value) = s.bindings.get(name) {
                return Some(value);
            }
            scope = s.parent;
        }
        None
    }
}

/// Compile a named formula with concrete argument texts into a spreadsheet
/// formula string
///
/// The result starts with `=` and contains a fully inlined, whitespace-free
/// infix expression. Identifiers bound neither as a parameter nor as a
/// constant pass through verbatim, which is how spreadsheet cell references
/// reach the output untouched.
///
/// # Example
/// ```rust
/// use cellform_dsl::{compile_formula, Definitions};
///
/// let defs = Definitions::parse("let rate = 0.19\ndefine net(g) = g / (1 + rate)").unwrap();
/// let out = compile_formula("net", &["A1".into()], &defs).unwrap();
/// assert_eq!(out, "=(A1/(1+0.19))");
/// ```
pub fn compile_formula(name: &str, args: &[String], defs: &Definitions) -> DslResult<String> {
    let formula = defs
        .formula(name)
        .ok_or_else(|| DslError::UnknownFormula(name.to_string()))?;
    check_arity(name, formula, args.len())?;

    // Root environment: constants first, then the top-level parameter
    // bindings so a parameter shadows a same-named constant
    let mut bindings: AHashMap<String, String> = defs
        .constants()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    for (param, value) in formula.params.iter().zip(args) {
        bindings.insert(param.clone(), value.clone());
    }

    let scope = Scope::root(bindings);
    let body = compile(&formula.body, &scope, defs, 0)?;

    // Whitespace is stripped in one pass over the composed string, not per
    // node, so whitespace inside substituted constant text is removed too
    let mut out = String::with_capacity(body.len() + 1);
    out.push('=');
    out.extend(body.chars().filter(|c| !c.is_whitespace()));
    Ok(out)
}

fn compile(expr: &Expr, scope: &Scope, defs: &Definitions, depth: usize) -> DslResult<String> {
    match expr {
        Expr::Number(text) => Ok(text.clone()),

        Expr::Variable(name) => Ok(scope.lookup(name).unwrap_or(name).to_string()),

        Expr::Binary { op, left, right } => {
            // Unconditional parenthesization keeps the emitted precedence
            // correct regardless of the surrounding context
            let left = compile(left, scope, defs, depth)?;
            let right = compile(right, scope, defs, depth)?;
            Ok(format!("({left}{}{right})", op.symbol()))
        }

        Expr::Call { name, args } => {
            if depth >= MAX_EXPANSION_DEPTH {
                return Err(DslError::CyclicDefinition(name.clone()));
            }

            let formula = defs
                .formula(name)
                .ok_or_else(|| DslError::UnknownFormula(name.clone()))?;
            check_arity(name, formula, args.len())?;

            // Arguments are textualized in the caller's scope; the callee
            // then sees its parameters plus, through the parent pointer,
            // every caller binding a parameter does not shadow
            let mut locals = AHashMap::with_capacity(args.len());
            for (param, arg) in formula.params.iter().zip(args) {
                locals.insert(param.clone(), compile(arg, scope, defs, depth + 1)?);
            }

            let callee_scope = scope.child(locals);
            compile(&formula.body, &callee_scope, defs, depth + 1)
        }
    }
}

fn check_arity(name: &str, formula: &Formula, actual: usize) -> DslResult<()> {
    if formula.params.len() != actual {
        return Err(DslError::ArityMismatch {
            formula: name.to_string(),
            expected: formula.params.len(),
            actual,
        });
    }
    Ok(())
}
