use crate::diagnostic::*;
use crate::registry::LogCall;
use crate::resolve::TypesInfo;
use crate::rules::{CallRule, Rule, constant_keys};
use crate::syntax::TextRange;
use crate::utils::is_letter;

#[derive(Clone, Copy, Debug, Default)]
pub struct English;

pub struct NonEnglish;

/// ## What it does
///
/// Checks that log messages and field keys only use ASCII letters.
///
/// Only letters are considered: digits, numerals, marks, punctuation and
/// symbols outside of the ASCII range (`Ⅻ` or an emoji for instance) are
/// left to the `symbols` rule.
///
/// ## Why is this bad?
///
/// Logs are searched, aggregated and alerted on by people and tools that
/// expect a single language. Keys written in another script also break
/// queries written against the usual field names.
///
/// ## Example
///
/// ```go
/// slog.Info("запуск сервера")
/// slog.Info("server started", "ключ", "value")
/// ```
///
/// Use instead:
/// ```go
/// slog.Info("starting server")
/// slog.Info("server started", "key", "value")
/// ```
impl Violation for NonEnglish {
    fn name(&self) -> String {
        "english".to_string()
    }
    fn body(&self) -> String {
        "log message should be in English".to_string()
    }
}

fn is_non_ascii_letter(c: char) -> bool {
    !c.is_ascii() && is_letter(c)
}

impl Rule for English {
    fn name(&self) -> &'static str {
        "english"
    }

    fn check_text(&self, text: &str, range: TextRange) -> Vec<Diagnostic> {
        if text.chars().any(is_non_ascii_letter) {
            vec![Diagnostic::new(NonEnglish, range)]
        } else {
            vec![]
        }
    }

    fn as_call_rule(&self) -> Option<&dyn CallRule> {
        Some(self)
    }
}

impl CallRule for English {
    fn check_call(&self, call: &LogCall<'_>, types: &dyn TypesInfo) -> Vec<Diagnostic> {
        constant_keys(call, types)
            .flat_map(|(key, range)| self.check_text(&key, range))
            .collect()
    }
}
