use rayon::prelude::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::constant::extract_constant_string;
use crate::diagnostic::*;
use crate::error::ConfigError;
use crate::registry::{LogCall, Registry};
use crate::resolve::TypesInfo;
use crate::rules::{English, Lowercase, Rule, Sensitive, Symbols};
use crate::syntax::{CallExpr, Expr, ExprKind, SourceUnit};

/// The logger registry and the rule instances, built once from the
/// configuration and shared by every analyzed unit.
pub struct Linter {
    registry: Registry,
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = Registry::new(config.logger_specs());
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(Lowercase),
            Box::new(English),
            Box::new(Symbols::new(&config.symbols.allowed)),
            Box::new(Sensitive::new(
                config.sensitive.keywords.as_deref(),
                &config.sensitive.patterns,
            )?),
        ];

        Ok(Self::from_parts(registry, rules))
    }

    pub fn from_parts(registry: Registry, rules: Vec<Box<dyn Rule>>) -> Self {
        tracing::debug!(
            "Built linter with rules: {}",
            rules.iter().map(|rule| rule.name()).collect::<Vec<_>>().join(", ")
        );
        Self { registry, rules }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Evaluates a single call-site and hands every diagnostic to `report`.
    ///
    /// Calls that do not resolve to a recognized logger are skipped.
    pub fn check_call(
        &self,
        call: &CallExpr,
        types: &dyn TypesInfo,
        report: &mut dyn FnMut(Diagnostic),
    ) {
        if let Some(log_call) = self.registry.log_call(call, types) {
            self.check_log_call(&log_call, types, report);
        }
    }

    /// Every rule checks the message when it folds to a constant, and rules
    /// with a call-level check always inspect the whole call.
    pub fn check_log_call(
        &self,
        log_call: &LogCall<'_>,
        types: &dyn TypesInfo,
        report: &mut dyn FnMut(Diagnostic),
    ) {
        let message = log_call
            .message()
            .and_then(|message| extract_constant_string(message, types));
        if message.is_none() {
            tracing::trace!(
                "Message of {} at {} is not a constant",
                log_call.target,
                log_call.call.range
            );
        }

        for rule in &self.rules {
            if let Some((text, range)) = &message {
                rule.check_text(text, *range).into_iter().for_each(&mut *report);
            }
            if let Some(call_rule) = rule.as_call_rule() {
                call_rule
                    .check_call(log_call, types)
                    .into_iter()
                    .for_each(&mut *report);
            }
        }
    }
}

#[derive(Debug, Default)]
// Collects the diagnostics of one unit.
pub struct Checker {
    pub diagnostics: Vec<Diagnostic>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

// Visits `expression` and its children in preorder and evaluates every call
// found on the way. Arguments of a logging call are visited too, since they
// may contain other logging calls.
pub fn check_expression(
    expression: &Expr,
    linter: &Linter,
    types: &dyn TypesInfo,
    checker: &mut Checker,
) {
    match &expression.kind {
        ExprKind::Call(call) => {
            let log_call = linter.registry().log_call(call, types);
            if let Some(log_call) = &log_call {
                linter.check_log_call(log_call, types, &mut |diagnostic| {
                    checker.report_diagnostic(diagnostic)
                });
            }
            check_call_children(call, log_call.as_ref(), linter, types, checker);
        }
        ExprKind::Selector(selector) => {
            check_expression(&selector.object, linter, types, checker);
        }
        ExprKind::Binary(binary) => {
            check_expression(&binary.left, linter, types, checker);
            check_expression(&binary.right, linter, types, checker);
        }
        ExprKind::Index(index) => {
            check_expression(&index.object, linter, types, checker);
            check_expression(&index.index, linter, types, checker);
        }
        ExprKind::Deref(inner) | ExprKind::Parenthesized(inner) => {
            check_expression(inner, linter, types, checker);
        }
        ExprKind::Identifier(_)
        | ExprKind::StringLiteral(_)
        | ExprKind::Literal(_)
        | ExprKind::Other => {}
    }
}

// A field constructor passed to a logging call was already checked as part
// of that call, so only its own arguments are visited.
fn check_call_children(
    call: &CallExpr,
    log_call: Option<&LogCall<'_>>,
    linter: &Linter,
    types: &dyn TypesInfo,
    checker: &mut Checker,
) {
    check_expression(&call.callee, linter, types, checker);
    for (index, argument) in call.arguments.iter().enumerate() {
        let field = log_call
            .filter(|log_call| index > log_call.message_index())
            .and_then(|_| linter.registry().field_constructor(argument, types));
        match field {
            Some(constructor) => check_call_children(constructor, None, linter, types, checker),
            None => check_expression(argument, linter, types, checker),
        }
    }
}

/// Diagnostics of one unit, sorted by span.
pub fn check_unit<T: TypesInfo>(unit: &SourceUnit<T>, linter: &Linter) -> Vec<Diagnostic> {
    let mut checker = Checker::new();
    for expression in &unit.expressions {
        check_expression(expression, linter, &unit.types, &mut checker);
    }

    let mut diagnostics = checker.diagnostics;
    diagnostics.sort();
    tracing::debug!("Found {} diagnostics in {}", diagnostics.len(), unit.path.display());
    diagnostics
}

/// Checks every unit in parallel. Each unit gets its own [`Checker`], the
/// linter is only read.
pub fn check<T: TypesInfo + Sync>(
    units: &[SourceUnit<T>],
    linter: &Linter,
) -> Vec<(PathBuf, Vec<Diagnostic>)> {
    units
        .par_iter()
        .map(|unit| (unit.path.clone(), check_unit(unit, linter)))
        .collect()
}
