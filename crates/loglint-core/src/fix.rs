use crate::diagnostic::*;

/// Applies the fixes of `diagnostics` to `contents`.
///
/// Fixes are applied in span order. A fix overlapping one that was already
/// applied is skipped, and so is a fix whose span does not fall on character
/// boundaries of `contents`. The first element of the result tells whether
/// anything was skipped, in which case the caller should check the new
/// contents again and apply the remaining fixes.
pub fn apply_fixes(diagnostics: &[Diagnostic], contents: &str) -> (bool, String) {
    let mut fixes = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .collect::<Vec<_>>();
    fixes.sort_by_key(|fix| (fix.start, fix.end));
    fixes.dedup();

    let mut new_content = String::with_capacity(contents.len());
    let mut last_modified_pos = 0;
    let mut has_skipped_fixes = false;

    for fix in fixes {
        if fix.start < last_modified_pos {
            has_skipped_fixes = true;
            continue;
        }

        let (Some(unchanged), Some(_)) =
            (contents.get(last_modified_pos..fix.start), contents.get(fix.start..fix.end))
        else {
            has_skipped_fixes = true;
            continue;
        };

        new_content.push_str(unchanged);
        new_content.push_str(&fix.content);
        last_modified_pos = fix.end;
    }

    if let Some(rest) = contents.get(last_modified_pos..) {
        new_content.push_str(rest);
    }

    (has_skipped_fixes, new_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Lowercase, Rule, Symbols};
    use crate::syntax::TextRange;

    #[test]
    fn test_apply_fixes() {
        let contents = r#"slog.Info("Hello!") // "Bye""#;
        let diagnostics = [
            Symbols::new("").check_text("Hello!", TextRange::new(10, 18)),
            Lowercase.check_text("Bye", TextRange::new(23, 28)),
        ]
        .concat();

        let (skipped, fixed) = apply_fixes(&diagnostics, contents);
        assert!(!skipped);
        assert_eq!(fixed, r#"slog.Info("Hello") // "bye""#);
    }

    #[test]
    fn test_overlapping_fixes_are_skipped() {
        let contents = r#"slog.Info("Hello!")"#;
        let range = TextRange::new(10, 18);
        let mut diagnostics = Lowercase.check_text("Hello!", range);
        diagnostics.extend(Symbols::new("").check_text("Hello!", range));

        let (skipped, fixed) = apply_fixes(&diagnostics, contents);
        assert!(skipped);
        assert_eq!(fixed, r#"slog.Info("hello!")"#);

        // A second pass picks up the remaining fix.
        let diagnostics = Symbols::new("").check_text("hello!", range);
        let (skipped, fixed) = apply_fixes(&diagnostics, &fixed);
        assert!(!skipped);
        assert_eq!(fixed, r#"slog.Info("hello")"#);
    }

    #[test]
    fn test_no_fixes() {
        let diagnostics = crate::rules::English.check_text("é", TextRange::new(0, 2));
        let (skipped, fixed) = apply_fixes(&diagnostics, "é");
        assert!(!skipped);
        assert_eq!(fixed, "é");
    }

    #[test]
    fn test_invalid_range_is_skipped() {
        let diagnostics = Lowercase.check_text("A", TextRange::new(1, 2));
        let (skipped, fixed) = apply_fixes(&diagnostics, "é");
        assert!(skipped);
        assert_eq!(fixed, "é");
    }
}
