//! Symbol and constant resolution supplied by the host.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::syntax::{BinaryOperator, CallExpr, Expr, ExprKind};

/// Resolved identity of whatever a call expression invokes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallTarget {
    /// Import path of the defining module, e.g. `log/slog`.
    pub module: String,
    /// Function or method name, e.g. `InfoContext`.
    pub name: String,
}

impl CallTarget {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self { module: module.into(), name: name.into() }
    }
}

impl fmt::Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// Resolves the target of a call expression.
///
/// Returns `None` when the target cannot be known statically, e.g. a call
/// through an interface value. Such call-sites are skipped.
pub trait SymbolResolver {
    fn resolve_call(&self, call: &CallExpr) -> Option<CallTarget>;
}

/// Returns the compile-time string value of an expression, if it has one.
pub trait ConstantResolver {
    fn constant_value(&self, expr: &Expr) -> Option<String>;
}

/// Everything the engine needs to know about a unit beyond its syntax.
pub trait TypesInfo: SymbolResolver + ConstantResolver {}

impl<T: SymbolResolver + ConstantResolver> TypesInfo for T {}

/// A table-driven resolver for hosts without a type checker.
///
/// Calls of the form `qualifier.Name(...)` resolve through a table mapping
/// the qualifier (a package alias or a variable known to hold a logger) to
/// a module path. For chained receivers such as `s.logger.Info(...)` the
/// last segment (`logger`) is looked up.
///
/// String literals, named constants, and `+` concatenations or parentheses
/// made only of those fold to constant values.
#[derive(Clone, Debug, Default)]
pub struct TableResolver {
    qualifiers: FxHashMap<String, String>,
    constants: FxHashMap<String, String>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>, module: impl Into<String>) -> Self {
        self.qualifiers.insert(qualifier.into(), module.into());
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.insert(name.into(), value.into());
        self
    }
}

impl SymbolResolver for TableResolver {
    fn resolve_call(&self, call: &CallExpr) -> Option<CallTarget> {
        let ExprKind::Selector(selector) = &call.callee.kind else {
            return None;
        };

        let qualifier = match &selector.object.kind {
            ExprKind::Identifier(ident) => &ident.name,
            ExprKind::Selector(inner) => &inner.field.name,
            _ => return None,
        };

        self.qualifiers
            .get(qualifier)
            .map(|module| CallTarget::new(module.clone(), selector.field.name.clone()))
    }
}

impl ConstantResolver for TableResolver {
    fn constant_value(&self, expr: &Expr) -> Option<String> {
        match &expr.kind {
            ExprKind::StringLiteral(value) => Some(value.clone()),
            ExprKind::Identifier(ident) => self.constants.get(&ident.name).cloned(),
            ExprKind::Parenthesized(inner) => self.constant_value(inner),
            ExprKind::Binary(binary) if binary.operator == BinaryOperator::Add => {
                let mut left = self.constant_value(&binary.left)?;
                left.push_str(&self.constant_value(&binary.right)?);
                Some(left)
            }
            _ => None,
        }
    }
}
