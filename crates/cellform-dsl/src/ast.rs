//! Formula-definition AST types

/// Expression AST for formula bodies
///
/// Nodes are immutable once constructed; the same parsed body may be inlined
/// many times under different environments without being copied.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, stored verbatim as written in the source so the
    /// original formatting survives into the emitted formula
    Number(String),
    /// Identifier reference, resolved against the environment at compile
    /// time (not parse time)
    Variable(String),
    /// Binary arithmetic operation
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Reference to a named formula definition, resolved lazily against the
    /// formula table at compile time
    Call { name: String, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// The operator's textual symbol as emitted into compiled formulas
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }
}

/// A named, parametrized formula definition
///
/// Built once by the definition table builder and read-only thereafter.
/// Parameter names are expected to be unique within one declaration; the
/// builder does not validate this.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub params: Vec<String>,
    pub body: Expr,
}
