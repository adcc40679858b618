use crate::resolve::ConstantResolver;
use crate::syntax::{Expr, TextRange};

/// Folds `expr` to its compile-time string value and returns it with the
/// span of the whole expression. `None` is a normal outcome: the value is
/// built at run time (a variable, a call, a concatenation with either).
pub fn extract_constant_string<C>(expr: &Expr, constants: &C) -> Option<(String, TextRange)>
where
    C: ConstantResolver + ?Sized,
{
    constants
        .constant_value(expr)
        .map(|value| (value, expr.range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils_test::*;

    #[test]
    fn test_extract_constant_string() {
        let types = test_types().with_constant("greeting", "hello");

        let extract = |code: &str| extract_constant_string(&parse_expr(code), &types);

        assert_eq!(
            extract(r#""server started""#),
            Some(("server started".to_string(), TextRange::new(0, 16)))
        );
        assert_eq!(
            extract(r#"("a" + "b")"#),
            Some(("ab".to_string(), TextRange::new(0, 11)))
        );
        assert_eq!(extract("greeting"), Some(("hello".to_string(), TextRange::new(0, 8))));
        assert_eq!(extract(r#""token: " + token"#), None);
        assert_eq!(extract("user.Name"), None);
        assert_eq!(extract("fmt.Sprintf(\"%d\", n)"), None);
        assert_eq!(extract("42"), None);
    }
}
