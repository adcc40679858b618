//! The checking rules.
//!
//! Every rule checks literal text (the message, once folded to a constant).
//! Rules that also need the shape of the whole call, e.g. to look at field
//! keys or at non-constant arguments, additionally expose [`CallRule`]
//! through [`Rule::as_call_rule`]; the driver runs both.

use crate::classify::ArgRole;
use crate::constant::extract_constant_string;
use crate::diagnostic::Diagnostic;
use crate::registry::LogCall;
use crate::resolve::TypesInfo;
use crate::syntax::TextRange;

pub(crate) mod english;
pub(crate) mod lowercase;
pub(crate) mod sensitive;
pub(crate) mod symbols;

pub use english::english::English;
pub use lowercase::lowercase::Lowercase;
pub use sensitive::sensitive::{DEFAULT_SENSITIVE_KEYWORDS, Sensitive};
pub use symbols::symbols::{DEFAULT_ALLOWED_SYMBOLS, Symbols};

pub trait Rule: Send + Sync {
    /// Unique identifier, e.g. `"lowercase"`.
    fn name(&self) -> &'static str;

    /// Checks a literal string found at `range`.
    fn check_text(&self, text: &str, range: TextRange) -> Vec<Diagnostic>;

    /// The call-level capability of this rule, if it has one.
    fn as_call_rule(&self) -> Option<&dyn CallRule> {
        None
    }
}

pub trait CallRule: Rule {
    /// Checks a recognized logging call as a whole.
    fn check_call(&self, call: &LogCall<'_>, types: &dyn TypesInfo) -> Vec<Diagnostic>;
}

/// Constant string keys of a logging call with their spans.
pub(crate) fn constant_keys<'a>(
    call: &'a LogCall<'_>,
    types: &'a dyn TypesInfo,
) -> impl Iterator<Item = (String, TextRange)> + 'a {
    call.classified_args(types)
        .filter(|arg| arg.role == ArgRole::Key)
        .filter_map(move |arg| extract_constant_string(arg.expr, types))
}
