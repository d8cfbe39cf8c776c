//! Expression parser
//!
//! A recursive descent parser for formula bodies with proper operator
//! precedence. Scanning and parsing are interleaved; no token stream is
//! materialized.

use crate::ast::{BinaryOp, Expr};
use crate::error::{DslError, DslResult};

/// Parse an expression string into an AST
///
/// Consumes one complete expression from the start of the input. Trailing
/// input after that expression is ignored.
///
/// # Example
/// ```rust
/// use cellform_dsl::parse_expression;
///
/// let ast = parse_expression("1 + 2 * 3").unwrap();
/// let ast = parse_expression("net_price(gross, TAX_RATE)").unwrap();
/// ```
pub fn parse_expression(input: &str) -> DslResult<Expr> {
    let mut parser = ExprParser::new(input);
    parser.parse_expr()
}

/// Expression parser over a borrowed input string
struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    // === Grammar ===
    // expr   := addsub
    // addsub := muldiv (('+' | '-') muldiv)*      left-associative
    // muldiv := primary (('*' | '/') primary)*    left-associative
    // primary:= '(' expr ')'
    //         | IDENT '(' (expr (',' expr)*)? ')'
    //         | NUMBER | IDENT

    fn parse_expr(&mut self) -> DslResult<Expr> {
        self.parse_addsub()
    }

    fn parse_addsub(&mut self) -> DslResult<Expr> {
        let mut left = self.parse_muldiv()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('+') => BinaryOp::Add,
                Some('-') => BinaryOp::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_muldiv()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_muldiv(&mut self) -> DslResult<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek() {
                Some('*') => BinaryOp::Multiply,
                Some('/') => BinaryOp::Divide,
                _ => break,
            };

            self.advance();
            let right = self.parse_primary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> DslResult<Expr> {
        self.skip_whitespace();

        // Parenthesized sub-expression
        if self.peek() == Some('(') {
            self.advance();
            let expr = self.parse_expr()?;
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(expr);
        }

        let token = self.scan_token();
        if token.is_empty() {
            return Err(DslError::Syntax(format!(
                "Expected a number, identifier or '(' at position {} in '{}'",
                self.pos, self.input
            )));
        }

        // A token followed by '(' is always a function call, even if the
        // token text would parse as a number
        self.skip_whitespace();
        if self.peek() == Some('(') {
            self.advance();
            let args = self.parse_call_args(token)?;
            return Ok(Expr::Call {
                name: token.to_string(),
                args,
            });
        }

        // Number vs. variable is decided by attempting a numeric parse; the
        // matched text is kept verbatim either way
        if token.parse::<f64>().is_ok() {
            Ok(Expr::Number(token.to_string()))
        } else {
            Ok(Expr::Variable(token.to_string()))
        }
    }

    fn parse_call_args(&mut self, name: &str) -> DslResult<Vec<Expr>> {
        let mut args = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                None => {
                    return Err(DslError::Syntax(format!(
                        "Unterminated argument list in call to '{name}'"
                    )));
                }
                _ => {}
            }

            args.push(self.parse_expr()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {}
                other => {
                    return Err(DslError::Syntax(format!(
                        "Expected ',' or ')' in call to '{name}', got {}",
                        match other {
                            Some(c) => format!("'{c}'"),
                            None => "end of input".to_string(),
                        }
                    )));
                }
            }
        }
    }

    // === Scanning helpers ===

    /// Scan a run of identifier/number characters starting at the cursor
    fn scan_token(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> DslResult<()> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(DslError::Syntax(format!(
                "Expected '{expected}' at position {} in '{}'",
                self.pos, self.input
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(text: &str) -> Expr {
        Expr::Number(text.into())
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.into())
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_parse_number_keeps_text_verbatim() {
        assert_eq!(parse_expression("42").unwrap(), num("42"));
        assert_eq!(parse_expression("3.14").unwrap(), num("3.14"));
        // Formatting like a trailing zero must survive
        assert_eq!(parse_expression("0.190").unwrap(), num("0.190"));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression("gross").unwrap(), var("gross"));
        assert_eq!(parse_expression("TAX_RATE").unwrap(), var("TAX_RATE"));
        // '.' and '_' are identifier characters
        assert_eq!(parse_expression("Sheet1.A1").unwrap(), var("Sheet1.A1"));
    }

    #[test]
    fn test_parse_precedence() {
        // 1+2*3 parses as 1+(2*3)
        assert_eq!(
            parse_expression("1 + 2 * 3").unwrap(),
            binary(
                BinaryOp::Add,
                num("1"),
                binary(BinaryOp::Multiply, num("2"), num("3"))
            )
        );
    }

    #[test]
    fn test_parse_left_associativity() {
        // 1-2-3 parses as (1-2)-3
        assert_eq!(
            parse_expression("1-2-3").unwrap(),
            binary(
                BinaryOp::Subtract,
                binary(BinaryOp::Subtract, num("1"), num("2")),
                num("3")
            )
        );
    }

    #[test]
    fn test_parse_parentheses() {
        assert_eq!(
            parse_expression("(1 + 2) * 3").unwrap(),
            binary(
                BinaryOp::Multiply,
                binary(BinaryOp::Add, num("1"), num("2")),
                num("3")
            )
        );
    }

    #[test]
    fn test_parse_call() {
        assert_eq!(
            parse_expression("net_price(gross)").unwrap(),
            Expr::Call {
                name: "net_price".into(),
                args: vec![var("gross")],
            }
        );
    }

    #[test]
    fn test_parse_call_with_no_args() {
        assert_eq!(
            parse_expression("pi()").unwrap(),
            Expr::Call {
                name: "pi".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_parse_nested_calls() {
        let ast = parse_expression("outer(inner(a, b), c + 1)").unwrap();
        if let Expr::Call { name, args } = ast {
            assert_eq!(name, "outer");
            assert_eq!(args.len(), 2);
            assert!(matches!(&args[0], Expr::Call { name, .. } if name == "inner"));
            assert!(matches!(&args[1], Expr::Binary { .. }));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_numeric_token_followed_by_paren_is_a_call() {
        let ast = parse_expression("42(x)").unwrap();
        assert!(matches!(ast, Expr::Call { name, .. } if name == "42"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "a * (b + net_price(c, 2)) - 1";
        assert_eq!(
            parse_expression(text).unwrap(),
            parse_expression(text).unwrap()
        );
    }

    #[test]
    fn test_trailing_input_is_ignored() {
        // One complete expression is consumed; the rest is not an error
        assert_eq!(parse_expression("1 2").unwrap(), num("1"));
    }

    #[test]
    fn test_unclosed_group_is_an_error() {
        assert!(matches!(
            parse_expression("(1 + 2"),
            Err(DslError::Syntax(_))
        ));
    }

    #[test]
    fn test_unterminated_argument_list_is_an_error() {
        assert!(matches!(
            parse_expression("f(1, 2"),
            Err(DslError::Syntax(_))
        ));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_expression(""), Err(DslError::Syntax(_))));
        assert!(matches!(parse_expression("   "), Err(DslError::Syntax(_))));
    }
}
