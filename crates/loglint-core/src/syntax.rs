//! Source model handed over by the host.
//!
//! The engine never parses source text itself. A host parser lowers every
//! analyzed unit into these expression trees, keeping byte spans so that
//! diagnostics and fixes point back into the original file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A byte span `[start, end)` in the analyzed source.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Smallest range covering both `self` and `other`.
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// Comparisons, logical and bitwise operators: none of them can build a
    /// string, so the engine does not distinguish them.
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorExpr {
    pub object: Box<Expr>,
    pub field: Ident,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub range: TextRange,
}

impl CallExpr {
    /// Name of the invoked function or method as written, e.g. `Info` for
    /// `logger.Info(...)`.
    pub fn callee_name(&self) -> Option<&str> {
        match &self.callee.kind {
            ExprKind::Identifier(ident) => Some(&ident.name),
            ExprKind::Selector(selector) => Some(&selector.field.name),
            _ => None,
        }
    }

    pub fn argument(&self, index: usize) -> Option<&Expr> {
        self.arguments.get(index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Identifier(Ident),
    /// A string literal, already unquoted by the host.
    StringLiteral(String),
    /// Numeric, rune and other non-string literals, kept as written.
    Literal(String),
    Selector(SelectorExpr),
    Binary(BinaryExpr),
    Index(IndexExpr),
    Deref(Box<Expr>),
    Parenthesized(Box<Expr>),
    Call(CallExpr),
    /// Anything else (composite literals, closures, conversions...).
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: TextRange,
}

impl Expr {
    pub fn new(kind: ExprKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match &self.kind {
            ExprKind::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::StringLiteral(value) => Some(value),
            _ => None,
        }
    }
}

/// One analyzed unit (typically a file) together with the type information
/// the host computed for it.
#[derive(Clone, Debug)]
pub struct SourceUnit<T> {
    pub path: PathBuf,
    pub expressions: Vec<Expr>,
    pub types: T,
}

impl<T> SourceUnit<T> {
    pub fn new(path: impl Into<PathBuf>, expressions: Vec<Expr>, types: T) -> Self {
        Self { path: path.into(), expressions, types }
    }
}
