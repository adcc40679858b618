use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::syntax::TextRange;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
// The replacement suggested for the violation.
pub struct Fix {
    // Human-readable summary, e.g. `change to "starting server"`.
    pub description: String,
    // Replacement text for `start..end`, already quoted as a literal.
    pub content: String,
    pub start: usize,
    pub end: usize,
}

impl Fix {
    pub fn replace(range: TextRange, content: String, description: String) -> Self {
        Self { description, content, start: range.start(), end: range.end() }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

/// Details on the violated rule.
pub trait Violation {
    /// Name of the rule.
    fn name(&self) -> String;
    /// What is wrong at the reported span.
    fn body(&self) -> String;
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViolationData {
    pub name: String,
    pub body: String,
}

impl<T: Violation> From<T> for ViolationData {
    fn from(value: T) -> Self {
        Self {
            name: Violation::name(&value),
            body: Violation::body(&value),
        }
    }
}

impl ViolationData {
    pub fn new(name: String, body: String) -> Self {
        Self { name, body }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
// The object that is eventually handed to the host's reporting sink.
pub struct Diagnostic {
    // The name of the violated rule and what is wrong.
    pub message: ViolationData,
    // Span the diagnostic points at.
    pub range: TextRange,
    // Suggested replacement, if the rule knows one.
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new<T: Into<ViolationData>>(message: T, range: TextRange) -> Self {
        Self { message: message.into(), range, fix: None }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn rule(&self) -> &str {
        &self.message.name
    }

    pub fn body(&self) -> &str {
        &self.message.body
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.range, self.message.body, self.message.name)
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare first by range, then by rule and message
        self.range
            .cmp(&other.range)
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.fix.cmp(&other.fix))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Lowercase, Rule};

    #[test]
    fn test_diagnostic_display() {
        let diagnostics = Lowercase.check_text("Hello", TextRange::new(10, 17));
        assert_eq!(
            diagnostics[0].to_string(),
            "[10..17] log message should start with a lowercase letter (lowercase)"
        );
    }

    #[test]
    fn test_diagnostic_serialization() {
        let diagnostic = Lowercase.check_text("Hello", TextRange::new(10, 17)).remove(0);

        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": {
                    "name": "lowercase",
                    "body": "log message should start with a lowercase letter",
                },
                "range": { "start": 10, "end": 17 },
                "fix": {
                    "description": "change to \"hello\"",
                    "content": "\"hello\"",
                    "start": 10,
                    "end": 17,
                },
            })
        );

        let back: Diagnostic = serde_json::from_value(value).unwrap();
        assert_eq!(back, diagnostic);
    }

    #[test]
    fn test_diagnostic_order() {
        let mut diagnostics = vec![
            Diagnostic::new(ViolationData::new("symbols".into(), "b".into()), TextRange::new(5, 9)),
            Diagnostic::new(ViolationData::new("english".into(), "a".into()), TextRange::new(5, 9)),
            Diagnostic::new(ViolationData::new("symbols".into(), "b".into()), TextRange::new(0, 3)),
        ];
        diagnostics.sort();
        let order: Vec<_> = diagnostics.iter().map(|d| (d.range.start(), d.rule())).collect();
        assert_eq!(order, vec![(0, "symbols"), (5, "english"), (5, "symbols")]);
    }
}
