//! Diagnostic AST printer
//!
//! Renders an expression tree as indented lines for inspection. Purely
//! presentational; the output is not parseable back into an [`Expr`].

use crate::ast::Expr;

/// Render an expression as an indented tree, one line per node
///
/// # Example
/// ```rust
/// use cellform_dsl::{parse_expression, render_tree};
///
/// let ast = parse_expression("1 + x").unwrap();
/// assert_eq!(render_tree(&ast), "BinaryOp: +\n  Number: 1\n  Variable: x\n");
/// ```
pub fn render_tree(expr: &Expr) -> String {
    let mut out = String::new();
    write_node(expr, 0, &mut out);
    out
}

fn write_node(expr: &Expr, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }

    match expr {
        Expr::Number(text) => {
            out.push_str("Number: ");
            out.push_str(text);
            out.push('\n');
        }
        Expr::Variable(name) => {
            out.push_str("Variable: ");
            out.push_str(name);
            out.push('\n');
        }
        Expr::Binary { op, left, right } => {
            out.push_str("BinaryOp: ");
            out.push(op.symbol());
            out.push('\n');
            write_node(left, depth + 1, out);
            write_node(right, depth + 1, out);
        }
        Expr::Call { name, args } => {
            out.push_str("FunctionCall: ");
            out.push_str(name);
            out.push('\n');
            for arg in args {
                write_node(arg, depth + 1, out);
            }
        }
    }
}
