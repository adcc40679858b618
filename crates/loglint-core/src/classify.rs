//! Splits the arguments following a log message into keys and values.

use std::iter::FusedIterator;
use std::slice;

use crate::registry::{ArgStyle, Registry};
use crate::resolve::TypesInfo;
use crate::syntax::{CallExpr, Expr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgRole {
    Key,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifiedArg<'a> {
    pub expr: &'a Expr,
    pub role: ArgRole,
}

/// Lazy, restartable (via `Clone`) sequence of the classified arguments of
/// one logging call. It never yields more items than the call has
/// arguments and sub-arguments.
///
/// - A field-constructor argument such as `slog.String("k", v)` yields its
///   first sub-argument as a key and the others as values.
/// - With [`ArgStyle::KeyValuePairs`], other arguments alternate key, value
///   counting from the message. A dangling last key is still a key.
/// - With any other style, other arguments are not classified.
#[derive(Clone)]
pub struct ClassifiedArgs<'a> {
    arguments: &'a [Expr],
    message_index: usize,
    next: usize,
    style: ArgStyle,
    registry: &'a Registry,
    types: &'a dyn TypesInfo,
    field_values: slice::Iter<'a, Expr>,
}

impl<'a> ClassifiedArgs<'a> {
    pub fn new(
        call: &'a CallExpr,
        message_index: usize,
        style: ArgStyle,
        registry: &'a Registry,
        types: &'a dyn TypesInfo,
    ) -> Self {
        Self {
            arguments: &call.arguments,
            message_index,
            next: message_index.saturating_add(1),
            style,
            registry,
            types,
            field_values: Default::default(),
        }
    }

    fn field_constructor(&self, argument: &'a Expr) -> Option<&'a CallExpr> {
        self.registry.field_constructor(argument, self.types)
    }
}

impl<'a> Iterator for ClassifiedArgs<'a> {
    type Item = ClassifiedArg<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.field_values.next() {
                return Some(ClassifiedArg { expr: value, role: ArgRole::Value });
            }

            let index = self.next;
            let argument = self.arguments.get(index)?;
            self.next += 1;

            if let Some(constructor) = self.field_constructor(argument) {
                let mut sub_arguments = constructor.arguments.iter();
                if let Some(key) = sub_arguments.next() {
                    self.field_values = sub_arguments;
                    return Some(ClassifiedArg { expr: key, role: ArgRole::Key });
                }
                continue;
            }

            if self.style == ArgStyle::KeyValuePairs {
                let role = if (index - self.message_index) % 2 == 1 {
                    ArgRole::Key
                } else {
                    ArgRole::Value
                };
                return Some(ClassifiedArg { expr: argument, role });
            }
        }
    }
}

impl FusedIterator for ClassifiedArgs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LoggerKind, LoggerSpec};
    use crate::utils_test::*;

    fn roles(code: &str, registry: &Registry) -> Vec<(String, ArgRole)> {
        let expr = parse_expr(code);
        let types = test_types();
        let call = expr.as_call().expect("fixture is a call");
        let log_call = registry
            .log_call(call, &types)
            .expect("fixture is a logging call");
        log_call
            .classified_args(&types)
            .map(|arg| (code[arg.expr.range.start()..arg.expr.range.end()].to_string(), arg.role))
            .collect()
    }

    #[test]
    fn test_key_value_pairs() {
        let registry = Registry::default();
        assert_eq!(
            roles(r#"slog.Info("msg", "user", name, "id", 42)"#, &registry),
            vec![
                (r#""user""#.to_string(), ArgRole::Key),
                ("name".to_string(), ArgRole::Value),
                (r#""id""#.to_string(), ArgRole::Key),
                ("42".to_string(), ArgRole::Value),
            ]
        );
    }

    #[test]
    fn test_dangling_key() {
        let registry = Registry::default();
        assert_eq!(
            roles(r#"sugar.Infow("msg", "a", 1, "b")"#, &registry),
            vec![
                (r#""a""#.to_string(), ArgRole::Key),
                ("1".to_string(), ArgRole::Value),
                (r#""b""#.to_string(), ArgRole::Key),
            ]
        );
    }

    #[test]
    fn test_parity_follows_message_index() {
        let registry = Registry::default();
        assert_eq!(
            roles(r#"slog.InfoContext(ctx, "msg", "k", v)"#, &registry),
            vec![
                (r#""k""#.to_string(), ArgRole::Key),
                ("v".to_string(), ArgRole::Value),
            ]
        );
        assert_eq!(
            roles(r#"slog.Log(ctx, level, "msg", "k", v)"#, &registry),
            vec![
                (r#""k""#.to_string(), ArgRole::Key),
                ("v".to_string(), ArgRole::Value),
            ]
        );
    }

    #[test]
    fn test_field_constructors() {
        let registry = Registry::default();
        assert_eq!(
            roles(
                r#"logger.Info("msg", zap.String("user", name), zap.Any("pair", a, b))"#,
                &registry
            ),
            vec![
                (r#""user""#.to_string(), ArgRole::Key),
                ("name".to_string(), ArgRole::Value),
                (r#""pair""#.to_string(), ArgRole::Key),
                ("a".to_string(), ArgRole::Value),
                ("b".to_string(), ArgRole::Value),
            ]
        );
    }

    #[test]
    fn test_empty_field_constructor_is_skipped() {
        let registry = Registry::default();
        assert_eq!(
            roles(r#"logger.Info("msg", zap.Stack(), zap.Int("n", 1))"#, &registry),
            vec![
                (r#""n""#.to_string(), ArgRole::Key),
                ("1".to_string(), ArgRole::Value),
            ]
        );
    }

    #[test]
    fn test_unknown_constructor_is_a_plain_argument() {
        let registry = Registry::default();
        // Not a field constructor: falls back to key/value parity.
        assert_eq!(
            roles(r#"slog.Info("msg", fmt.Sprint("x"), v)"#, &registry),
            vec![
                (r#"fmt.Sprint("x")"#.to_string(), ArgRole::Key),
                ("v".to_string(), ArgRole::Value),
            ]
        );
        // Zap's structured style does not classify plain arguments.
        assert!(roles(r#"logger.Info("msg", fields, "k")"#, &registry).is_empty());
    }

    #[test]
    fn test_positional_styles_yield_nothing() {
        let registry = Registry::default();
        assert!(roles(r#"sugar.Infof("user %s", name)"#, &registry).is_empty());

        let custom = LoggerSpec::new("example.com/custom", LoggerKind::Generic);
        let registry = Registry::new(Some(vec![custom]));
        assert!(roles(r#"custom.Print("msg", "k", v)"#, &registry).is_empty());
    }

    #[test]
    fn test_missing_message() {
        let registry = Registry::default();
        assert!(roles(r#"slog.InfoContext(ctx)"#, &registry).is_empty());
        assert!(roles(r#"slog.Info()"#, &registry).is_empty());
    }

    #[test]
    fn test_restartable() {
        let registry = Registry::default();
        let code = r#"slog.Info("msg", "k", v)"#;
        let expr = parse_expr(code);
        let types = test_types();
        let log_call = registry
            .log_call(expr.as_call().unwrap(), &types)
            .unwrap();
        let args = log_call.classified_args(&types);

        let first: Vec<_> = args.clone().collect();
        let second: Vec<_> = args.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
