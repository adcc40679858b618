//! Logger registry: which call targets are logging calls, where their
//! message argument sits and how their trailing arguments are shaped.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::classify::ClassifiedArgs;
use crate::resolve::{CallTarget, TypesInfo};
use crate::syntax::{CallExpr, Expr};

/// Family of a logging API. Decides which methods are logging calls and the
/// defaults for everything else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoggerKind {
    /// `log/slog`-like: `Info(msg, args...)`, `InfoContext(ctx, msg, args...)`,
    /// `Log(ctx, level, msg, args...)`.
    Slog,
    /// `go.uber.org/zap`-like: typed fields on `Logger`, printf-style `f`
    /// and key-value `w` methods on the sugared logger.
    Zap,
    /// Any function of the module is a logging call.
    #[default]
    Generic,
}

/// Shape of the arguments following the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgStyle {
    /// Plain positional or printf-style values.
    Positional,
    /// Flat `key, value, key, value` sequence.
    KeyValuePairs,
    /// Field objects built by field constructors.
    StructuredFields,
}

/// Position of the message argument as a function of the method name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageIndexRule {
    Fixed(usize),
    /// `Log`/`LogAttrs` take a context and a level first (index 2),
    /// `*Context` methods take a context first (index 1), everything else
    /// starts with the message.
    LevelAndContext,
}

impl MessageIndexRule {
    pub fn index_for(self, function: &str) -> usize {
        match self {
            MessageIndexRule::Fixed(index) => index,
            MessageIndexRule::LevelAndContext => match function {
                "Log" | "LogAttrs" => 2,
                _ if function.ends_with("Context") => 1,
                _ => 0,
            },
        }
    }
}

const SLOG_METHODS: &[&str] = &[
    "Info",
    "Warn",
    "Error",
    "Debug",
    "Log",
    "InfoContext",
    "WarnContext",
    "ErrorContext",
    "DebugContext",
    "LogAttrs",
];

const ZAP_LEVELS: &[&str] = &["Info", "Warn", "Error", "Debug", "Panic", "Fatal", "DPanic"];

const SLOG_FIELD_CONSTRUCTORS: &[&str] = &[
    "String", "Int", "Int64", "Float64", "Bool", "Time", "Duration", "Any", "Group", "Attr",
];

const ZAP_FIELD_CONSTRUCTORS: &[&str] = &[
    "String", "Int", "Int64", "Float64", "Bool", "Time", "Duration", "Any",
    "Binary", "ByteString", "Error", "NamedError", "Stringer",
    "Strings", "Ints", "Float64s", "Bools", "Times", "Durations",
    "Object", "Array", "Reflect", "Namespace", "Stack",
    "Int8", "Int16", "Int32", "Uint", "Uint8", "Uint16", "Uint32", "Uint64",
    "Float32", "Complex64", "Complex128", "Uintptr",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerSpec {
    pub module: String,
    pub kind: LoggerKind,
    pub style: ArgStyle,
    pub message_index: MessageIndexRule,
    pub field_constructors: FxHashSet<String>,
}

impl LoggerSpec {
    /// A spec with the defaults of its `kind`.
    pub fn new(module: impl Into<String>, kind: LoggerKind) -> Self {
        let (style, message_index) = match kind {
            LoggerKind::Slog => (ArgStyle::KeyValuePairs, MessageIndexRule::LevelAndContext),
            LoggerKind::Zap => (ArgStyle::StructuredFields, MessageIndexRule::Fixed(0)),
            LoggerKind::Generic => (ArgStyle::Positional, MessageIndexRule::Fixed(0)),
        };
        Self {
            module: module.into(),
            kind,
            style,
            message_index,
            field_constructors: FxHashSet::default(),
        }
    }

    pub fn with_style(mut self, style: ArgStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_message_index(mut self, rule: MessageIndexRule) -> Self {
        self.message_index = rule;
        self
    }

    pub fn with_field_constructors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_constructors.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn slog() -> Self {
        Self::new("log/slog", LoggerKind::Slog)
            .with_field_constructors(SLOG_FIELD_CONSTRUCTORS.iter().copied())
    }

    pub fn zap() -> Self {
        Self::new("go.uber.org/zap", LoggerKind::Zap)
            .with_field_constructors(ZAP_FIELD_CONSTRUCTORS.iter().copied())
    }

    /// Whether `function` of this module is a logging call.
    pub fn supports(&self, function: &str) -> bool {
        match self.kind {
            LoggerKind::Slog => SLOG_METHODS.contains(&function),
            LoggerKind::Zap => {
                let level = function
                    .strip_suffix('f')
                    .or_else(|| function.strip_suffix('w'))
                    .filter(|level| ZAP_LEVELS.contains(level))
                    .unwrap_or(function);
                ZAP_LEVELS.contains(&level)
            }
            // Its own field constructors build arguments, they do not log.
            LoggerKind::Generic => !self.is_field_constructor(function),
        }
    }

    /// Argument style of `function`. For zap the method suffix decides:
    /// `Infow` takes key-value pairs, `Infof` a printf template.
    pub fn style_for(&self, function: &str) -> ArgStyle {
        if self.kind == LoggerKind::Zap {
            if function.ends_with('w') {
                return ArgStyle::KeyValuePairs;
            }
            if function.ends_with('f') {
                return ArgStyle::Positional;
            }
        }
        self.style
    }

    pub fn message_index_for(&self, function: &str) -> usize {
        self.message_index.index_for(function)
    }

    pub fn is_field_constructor(&self, function: &str) -> bool {
        self.field_constructors.contains(function)
    }
}

static DEFAULT_SPECS: OnceLock<Vec<LoggerSpec>> = OnceLock::new();

/// Built-in logger table: `log/slog` and `go.uber.org/zap`.
pub fn default_specs() -> &'static [LoggerSpec] {
    DEFAULT_SPECS.get_or_init(|| vec![LoggerSpec::slog(), LoggerSpec::zap()])
}

/// Strips a vendoring prefix so that `example.com/app/vendor/go.uber.org/zap`
/// matches `go.uber.org/zap`.
pub fn normalize_vendor(module: &str) -> &str {
    const VENDOR: &str = "/vendor/";
    match module.find(VENDOR) {
        Some(i) => &module[i + VENDOR.len()..],
        None => module,
    }
}

#[derive(Clone, Debug)]
pub struct Registry {
    specs: Cow<'static, [LoggerSpec]>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Registry {
    /// Builds the registry. An explicit list replaces the built-in defaults
    /// entirely, so `Some(vec![])` disables every logger.
    pub fn new(custom: Option<Vec<LoggerSpec>>) -> Self {
        match custom {
            Some(specs) => {
                tracing::debug!("Using {} configured logger specs", specs.len());
                Self { specs: Cow::Owned(specs) }
            }
            None => {
                tracing::debug!("Using built-in logger specs");
                Self { specs: Cow::Borrowed(default_specs()) }
            }
        }
    }

    pub fn specs(&self) -> &[LoggerSpec] {
        &self.specs
    }

    /// First spec whose module matches, after vendor normalization.
    pub fn find_spec(&self, module: &str) -> Option<&LoggerSpec> {
        let module = normalize_vendor(module);
        self.specs.iter().find(|spec| spec.module == module)
    }

    pub fn resolve(&self, target: &CallTarget) -> Option<&LoggerSpec> {
        self.find_spec(&target.module)
            .filter(|spec| spec.supports(&target.name))
    }

    pub fn message_index(&self, target: &CallTarget) -> usize {
        self.find_spec(&target.module)
            .map_or(0, |spec| spec.message_index_for(&target.name))
    }

    pub fn is_field_constructor(&self, target: &CallTarget) -> bool {
        self.find_spec(&target.module)
            .is_some_and(|spec| spec.is_field_constructor(&target.name))
    }

    /// The call behind `argument` when it is a field constructor such as
    /// `zap.String("k", v)`.
    pub fn field_constructor<'e>(
        &self,
        argument: &'e Expr,
        types: &dyn TypesInfo,
    ) -> Option<&'e CallExpr> {
        let call = argument.as_call()?;
        let target = types.resolve_call(call)?;
        self.is_field_constructor(&target).then_some(call)
    }

    /// Resolves `call` into a logging call, or `None` when its target is
    /// unknown or not a recognized logger.
    pub fn log_call<'a>(&'a self, call: &'a CallExpr, types: &dyn TypesInfo) -> Option<LogCall<'a>> {
        let Some(target) = types.resolve_call(call) else {
            tracing::trace!("Skipping call at {}: unresolved target", call.range);
            return None;
        };
        let Some(spec) = self.resolve(&target) else {
            tracing::trace!("Skipping call to {target}: not a supported logger");
            return None;
        };
        Some(LogCall { call, target, spec, registry: self })
    }
}

/// A call-site recognized as a logging call.
#[derive(Clone, Debug)]
pub struct LogCall<'a> {
    pub call: &'a CallExpr,
    pub target: CallTarget,
    pub spec: &'a LoggerSpec,
    pub registry: &'a Registry,
}

impl<'a> LogCall<'a> {
    pub fn message_index(&self) -> usize {
        self.spec.message_index_for(&self.target.name)
    }

    pub fn style(&self) -> ArgStyle {
        self.spec.style_for(&self.target.name)
    }

    /// The message argument, if the call has that many arguments.
    pub fn message(&self) -> Option<&'a Expr> {
        self.call.argument(self.message_index())
    }

    pub fn classified_args<'s>(&'s self, types: &'s dyn TypesInfo) -> ClassifiedArgs<'s> {
        ClassifiedArgs::new(
            self.call,
            self.message_index(),
            self.style(),
            self.registry,
            types,
        )
    }
}
