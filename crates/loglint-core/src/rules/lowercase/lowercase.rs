use crate::diagnostic::*;
use crate::rules::Rule;
use crate::syntax::TextRange;
use crate::utils::quote_literal;

#[derive(Clone, Copy, Debug, Default)]
pub struct Lowercase;

pub struct UppercaseStart;

/// ## What it does
///
/// Checks that log messages start with a lowercase letter.
///
/// ## Why is this bad?
///
/// Log lines are usually read as fragments glued to a timestamp, a level and
/// some fields. A capitalized first word makes them look like sentences and
/// makes grepping for a message depend on where it was emitted from.
///
/// Messages starting with a digit, a space or a punctuation mark are not
/// reported.
///
/// ## Example
///
/// ```go
/// slog.Info("Starting server on port 8080")
/// ```
///
/// Use instead:
/// ```go
/// slog.Info("starting server on port 8080")
/// ```
impl Violation for UppercaseStart {
    fn name(&self) -> String {
        "lowercase".to_string()
    }
    fn body(&self) -> String {
        "log message should start with a lowercase letter".to_string()
    }
}

impl Rule for Lowercase {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn check_text(&self, text: &str, range: TextRange) -> Vec<Diagnostic> {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return vec![];
        };
        if !first.is_uppercase() {
            return vec![];
        }

        let fixed: String = first.to_lowercase().chain(chars).collect();
        let fix = Fix::replace(
            range,
            quote_literal(&fixed),
            format!("change to {}", quote_literal(&fixed)),
        );
        vec![Diagnostic::new(UppercaseStart, range).with_fix(fix)]
    }
}
