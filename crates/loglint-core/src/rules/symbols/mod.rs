pub(crate) mod symbols;

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::rules::{Rule, Symbols};
    use crate::syntax::TextRange;
    use crate::utils_test::*;

    #[test]
    fn test_lint_symbols() {
        use insta::assert_snapshot;

        let expected_message = "should not contain special characters or emoji";

        expect_lint(r#"slog.Info("server started!🚀")"#, expected_message, "symbols");
        expect_lint(r#"slog.Error("connection failed!!!")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("user@host")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("issue #123")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("data: {key}")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("list: [1,2]")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("love ❤️")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("tab\tseparated")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("half ½ done")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("area m²")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("version Ⅻ")"#, expected_message, "symbols");
        expect_lint(r#"slog.Info("server started", "key!", "value")"#, expected_message, "symbols");
        expect_lint(
            r#"sugar.Infow("server started", "key", "value", "key!", "value")"#,
            expected_message,
            "symbols",
        );
        expect_lint(
            r#"logger.Info("server started", zap.String("key!", "value"))"#,
            expected_message,
            "symbols",
        );

        assert_snapshot!(
            get_fixed_text(
                vec![
                    r#"slog.Info("server started!🚀")"#,
                    r#"slog.Error("connection failed!!!")"#,
                    r#"slog.Info("msg", "key!", "value!")"#,
                ],
                "symbols",
            ),
            @r#"
        OLD:
        ====
        slog.Info("server started!🚀")
        NEW:
        ====
        slog.Info("server started")

        OLD:
        ====
        slog.Error("connection failed!!!")
        NEW:
        ====
        slog.Error("connection failed")

        OLD:
        ====
        slog.Info("msg", "key!", "value!")
        NEW:
        ====
        slog.Info("msg", "key", "value!")
        "#
        );
    }

    #[test]
    fn test_no_lint_symbols() {
        expect_no_lint(r#"slog.Info("user_id=123 (test)")"#, "symbols");
        expect_no_lint(r#"slog.Info("can't connect")"#, "symbols");
        expect_no_lint(r#"slog.Info("server stopped.")"#, "symbols");
        expect_no_lint(r#"slog.Info("a, b, c")"#, "symbols");
        expect_no_lint(r#"slog.Info("re-deploy")"#, "symbols");
        expect_no_lint(r#"slog.Info("error: timeout")"#, "symbols");
        expect_no_lint(r#"slog.Info("/api/v1/users")"#, "symbols");
        expect_no_lint(r#"slog.Info("100% done")"#, "symbols");
        expect_no_lint(r#"slog.Info("port 8080")"#, "symbols");
        expect_no_lint(r#"slog.Info("")"#, "symbols");
        expect_no_lint(r#"slog.Info("сервер запущен ٣")"#, "symbols");
        // Values and printf arguments are not checked.
        expect_no_lint(r#"slog.Info("server started", "key", "value!")"#, "symbols");
        expect_no_lint(r#"sugar.Infof("done %s", "!!!")"#, "symbols");
    }

    #[test]
    fn test_symbols_allowed_by_config() {
        let mut config = Config::default();
        config.symbols.allowed = "@#".to_string();

        let rule = |code: &str| -> Vec<String> {
            check_code_with_config(code, &config)
                .into_iter()
                .filter(|d| d.message.name == "symbols")
                .map(|d| d.message.body)
                .collect()
        };

        assert!(rule(r#"slog.Info("user@host")"#).is_empty());
        assert!(rule(r#"slog.Info("issue #1")"#).is_empty());
        assert!(rule(r#"slog.Info("done.")"#).is_empty());
        assert!(rule(r#"slog.Info("key: value")"#).is_empty());
        assert_eq!(rule(r#"slog.Info("error!")"#).len(), 1);
    }

    #[test]
    fn test_symbols_fix_strips_exactly_disallowed() {
        let rule = Symbols::new("");
        let diagnostics = rule.check_text("hello!🚀", TextRange::new(0, 0));
        let fix = diagnostics[0].fix.as_ref().unwrap();
        assert_eq!(fix.content, r#""hello""#);
        assert_eq!(fix.description, r#"remove special characters -> "hello""#);

        let diagnostics = rule.check_text("half ½ done", TextRange::new(0, 0));
        assert_eq!(diagnostics[0].fix.as_ref().unwrap().content, r#""half  done""#);
        let diagnostics = rule.check_text("area m²", TextRange::new(0, 0));
        assert_eq!(diagnostics[0].fix.as_ref().unwrap().content, r#""area m""#);

        let text = "a{b}c d-e [f] g's";
        let diagnostics = rule.check_text(text, TextRange::new(0, 0));
        assert_eq!(diagnostics[0].fix.as_ref().unwrap().content, r#""abc d-e f g's""#);
    }
}
