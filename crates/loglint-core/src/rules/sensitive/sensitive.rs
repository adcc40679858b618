use regex::Regex;

use crate::classify::ArgRole;
use crate::constant::extract_constant_string;
use crate::diagnostic::*;
use crate::error::ConfigError;
use crate::registry::LogCall;
use crate::resolve::TypesInfo;
use crate::rules::{CallRule, Rule};
use crate::syntax::{BinaryOperator, Expr, ExprKind, TextRange};

/// Keywords used when the configuration does not provide any.
pub static DEFAULT_SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "api_key",
    "apikey",
    "access_key",
    "auth_token",
    "credential",
    "private_key",
];

#[derive(Clone, Debug)]
pub struct Sensitive {
    // Lowercased, trimmed and non-empty.
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensitiveData {
    Message,
    FieldKey,
    Attribute,
    VariableName,
    FieldName,
}

/// ## What it does
///
/// Checks that log calls do not expose credentials. A text is suspicious
/// when it matches one of the configured regular expressions, or when it
/// contains one of the keywords (case-insensitive). The default keywords
/// are `password`, `passwd`, `secret`, `token`, `api_key`, `apikey`,
/// `access_key`, `auth_token`, `credential` and `private_key`.
///
/// The rule looks at:
///
/// - constant messages and constant field keys,
/// - every string literal, variable name and field name that takes part in
///   a non-constant message or in a field value, e.g. `"token: " + token`
///   or `u.Password`.
///
/// ## Why is this bad?
///
/// Logs are usually kept for a long time, shipped to third parties and
/// readable by many more people than the secrets they contain.
///
/// ## Example
///
/// ```go
/// slog.Info("user password: " + password)
/// slog.Info("login", "token", u.Token)
/// ```
///
/// Use instead:
/// ```go
/// slog.Info("user authenticated")
/// slog.Info("login", "user_id", u.ID)
/// ```
impl Violation for SensitiveData {
    fn name(&self) -> String {
        "sensitive".to_string()
    }
    fn body(&self) -> String {
        match self {
            Self::Message => "log message may contain sensitive data",
            Self::FieldKey => "log field key may contain sensitive data",
            Self::Attribute => "log attribute contains sensitive data",
            Self::VariableName => "variable name suggests sensitive data",
            Self::FieldName => "field name suggests sensitive data",
        }
        .to_string()
    }
}

impl Default for Sensitive {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_SENSITIVE_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl Sensitive {
    /// `None` or an empty list of keywords selects the defaults, otherwise
    /// the given keywords replace them. Empty patterns are ignored.
    pub fn new(keywords: Option<&[String]>, patterns: &[String]) -> Result<Self, ConfigError> {
        let keywords: Vec<String> = match keywords {
            Some(keywords) if !keywords.is_empty() => keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .filter(|kw| !kw.is_empty())
                .collect(),
            _ => DEFAULT_SENSITIVE_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
        };

        let patterns = patterns
            .iter()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { keywords, patterns })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Patterns run on the text as is, keywords on its lowercase form.
    pub fn is_sensitive(&self, text: &str) -> bool {
        if self.patterns.iter().any(|re| re.is_match(text)) {
            return true;
        }
        let lower = text.to_lowercase();
        self.keywords.iter().any(|kw| lower.contains(kw.as_str()))
    }

    // `literal` is the kind reported for string literals found in `expr`.
    fn check_operand(&self, expr: &Expr, literal: SensitiveData, diagnostics: &mut Vec<Diagnostic>) {
        match &expr.kind {
            ExprKind::Identifier(ident) => {
                if self.is_sensitive(&ident.name) {
                    diagnostics.push(Diagnostic::new(SensitiveData::VariableName, expr.range));
                }
            }
            ExprKind::Selector(selector) => {
                if self.is_sensitive(&selector.field.name) {
                    diagnostics.push(Diagnostic::new(SensitiveData::FieldName, expr.range));
                }
                self.check_operand(&selector.object, literal, diagnostics);
            }
            ExprKind::StringLiteral(value) => {
                if self.is_sensitive(value) {
                    diagnostics.push(Diagnostic::new(literal, expr.range));
                }
            }
            ExprKind::Binary(binary) if binary.operator == BinaryOperator::Add => {
                self.check_operand(&binary.left, literal, diagnostics);
                self.check_operand(&binary.right, literal, diagnostics);
            }
            ExprKind::Index(index) => {
                self.check_operand(&index.index, literal, diagnostics);
                self.check_operand(&index.object, literal, diagnostics);
            }
            ExprKind::Deref(inner) | ExprKind::Parenthesized(inner) => {
                self.check_operand(inner, literal, diagnostics);
            }
            _ => {}
        }
    }
}

impl Rule for Sensitive {
    fn name(&self) -> &'static str {
        "sensitive"
    }

    fn check_text(&self, text: &str, range: TextRange) -> Vec<Diagnostic> {
        if self.is_sensitive(text) {
            vec![Diagnostic::new(SensitiveData::Message, range)]
        } else {
            vec![]
        }
    }

    fn as_call_rule(&self) -> Option<&dyn CallRule> {
        Some(self)
    }
}

impl CallRule for Sensitive {
    fn check_call(&self, call: &LogCall<'_>, types: &dyn TypesInfo) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        // Constant messages go through `check_text`.
        if let Some(message) = call.message()
            && extract_constant_string(message, types).is_none()
        {
            self.check_operand(message, SensitiveData::Message, &mut diagnostics);
        }

        for arg in call.classified_args(types) {
            match arg.role {
                ArgRole::Key => match extract_constant_string(arg.expr, types) {
                    Some((key, range)) => {
                        if self.is_sensitive(&key) {
                            diagnostics.push(Diagnostic::new(SensitiveData::FieldKey, range));
                        }
                    }
                    None => self.check_operand(arg.expr, SensitiveData::Attribute, &mut diagnostics),
                },
                ArgRole::Value => {
                    self.check_operand(arg.expr, SensitiveData::Attribute, &mut diagnostics)
                }
            }
        }

        diagnostics
    }
}
