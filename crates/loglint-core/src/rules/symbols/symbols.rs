use rustc_hash::FxHashSet;

use crate::diagnostic::*;
use crate::registry::LogCall;
use crate::resolve::TypesInfo;
use crate::rules::{CallRule, Rule, constant_keys};
use crate::syntax::TextRange;
use crate::utils::{is_decimal_digit, is_letter, quote_literal};

/// Punctuation that is always accepted besides letters, digits and spaces.
pub static DEFAULT_ALLOWED_SYMBOLS: &[char] =
    &['.', ',', '-', '_', ':', '/', '=', '%', '(', ')', '\''];

#[derive(Clone, Debug, Default)]
pub struct Symbols {
    // Characters whitelisted through the configuration.
    extra: FxHashSet<char>,
}

pub struct SpecialCharacters;

/// ## What it does
///
/// Checks that log messages and field keys only contain letters, digits,
/// spaces and a small set of punctuation: `. , - _ : / = % ( ) '`. More
/// characters can be allowed with `allowed` in the `[symbols]` section of
/// `loglint.toml`.
///
/// The fix removes every other character.
///
/// ## Why is this bad?
///
/// Exclamation marks, emoji and decorative characters add noise, break
/// naive parsers of log lines and are hard to search for.
///
/// ## Example
///
/// ```go
/// slog.Info("server started!🚀")
/// ```
///
/// Use instead:
/// ```go
/// slog.Info("server started")
/// ```
impl Violation for SpecialCharacters {
    fn name(&self) -> String {
        "symbols".to_string()
    }
    fn body(&self) -> String {
        "log message should not contain special characters or emoji".to_string()
    }
}

impl Symbols {
    pub fn new(allowed: &str) -> Self {
        Self { extra: allowed.chars().collect() }
    }

    pub fn is_allowed(&self, c: char) -> bool {
        is_letter(c)
            || is_decimal_digit(c)
            || c == ' '
            || DEFAULT_ALLOWED_SYMBOLS.contains(&c)
            || self.extra.contains(&c)
    }
}

impl Rule for Symbols {
    fn name(&self) -> &'static str {
        "symbols"
    }

    fn check_text(&self, text: &str, range: TextRange) -> Vec<Diagnostic> {
        if text.chars().all(|c| self.is_allowed(c)) {
            return vec![];
        }

        let cleaned: String = text.chars().filter(|c| self.is_allowed(*c)).collect();
        let fix = Fix::replace(
            range,
            quote_literal(&cleaned),
            format!("remove special characters -> {}", quote_literal(&cleaned)),
        );
        vec![Diagnostic::new(SpecialCharacters, range).with_fix(fix)]
    }

    fn as_call_rule(&self) -> Option<&dyn CallRule> {
        Some(self)
    }
}

impl CallRule for Symbols {
    fn check_call(&self, call: &LogCall<'_>, types: &dyn TypesInfo) -> Vec<Diagnostic> {
        constant_keys(call, types)
            .flat_map(|(key, range)| self.check_text(&key, range))
            .collect()
    }
}
