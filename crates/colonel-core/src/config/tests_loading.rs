//! Loading-focused tests for configuration
//!
//! File parsing, layering, validation and environment overrides.

#[cfg(test)]
#[allow(clippy::expect_used)]
mod loading_tests {
    use std::io::Write;

    use serial_test::serial;

    use crate::config::{load_config, load_partial_toml_file, ColorMode, Config};
    use crate::{Error, SenderKind};

    const ENV_VARS: [&str; 4] = [
        "COLONEL_NAMESPACE",
        "COLONEL_COLOR",
        "COLONEL_SENDER_NAME",
        "COLONEL_SENDER_KIND",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("colonel.toml");
        let mut file = std::fs::File::create(&path).expect("create config file");
        file.write_all(content.as_bytes())
            .expect("write config file");
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.namespace, "colonel");
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.sender.name, "CONSOLE");
        assert_eq!(config.sender.kind, SenderKind::Console);
        assert!(!config.sender.op);
        assert!(config.commands.is_empty());
    }

    #[test]
    fn test_explicit_keys_only_override() {
        let config = Config::from_toml(
            r#"
            [sender]
            name = "Steve"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.sender.name, "Steve");
        assert_eq!(config.sender.kind, SenderKind::Console);
        assert_eq!(config.namespace, "colonel");
    }

    #[test]
    fn test_commands_accumulate_across_layers() {
        let mut config = Config::from_toml(
            r#"
            [[command]]
            [command.header]
            name = "eco"
            "#,
        )
        .expect("first layer");
        let second = toml::from_str(
            r#"
            [[command]]
            [command.header]
            name = "bank"
            "#,
        )
        .expect("second layer");
        config.merge_partial(second);

        let names: Vec<_> = config
            .commands
            .iter()
            .filter_map(|decl| decl.header.as_ref().map(|h| h.name.as_str()))
            .collect();
        assert_eq!(names, vec!["eco", "bank"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Config::from_toml("namepsace = \"typo\"");
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        assert!(matches!(
            Config::from_toml("namespace = \"Has Space\""),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_toml("namespace = \"\""),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = Config::from_toml("color = \"sometimes\"");
        assert!(matches!(result, Err(Error::ParseError(msg)) if msg.contains("color mode")));
    }

    #[test]
    fn test_negative_bound_other_than_minus_one_rejected() {
        let result = Config::from_toml(
            r#"
            [[command]]
            [command.header]
            name = "eco"
            [[command.method]]
            name = "give"
            [command.method.executor]
            name = "give"
            min_arguments = -2
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "namespace = \n invalid toml [[[");

        let result = load_partial_toml_file(&path);
        assert!(matches!(result, Err(Error::ParseError(msg)) if msg.contains("colonel.toml")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_partial_toml_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_partial_toml_file(dir.path());
        assert!(matches!(result, Err(Error::IoError(msg)) if msg.contains("directory")));
    }

    #[test]
    #[serial]
    fn test_explicit_file_loaded() {
        clear_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            r#"
            namespace = "economy"
            color = "never"

            [sender]
            kind = "player"
            name = "Alex"
            permissions = ["eco.use"]
            "#,
        );

        let config = load_config(Some(&path)).expect("config should load");
        assert_eq!(config.namespace, "economy");
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.sender.kind, SenderKind::Player);

        let sender = config.sender.to_sender();
        assert!(crate::Sender::has_permission(&sender, "eco.use"));
        assert_eq!(crate::Sender::name(&sender), "Alex");
    }

    #[test]
    #[serial]
    fn test_explicit_missing_file_fails() {
        clear_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_config(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "namespace = \"economy\"\ncolor = \"never\"");

        std::env::set_var("COLONEL_NAMESPACE", "bank");
        std::env::set_var("COLONEL_COLOR", "always");
        std::env::set_var("COLONEL_SENDER_KIND", "block");
        std::env::set_var("COLONEL_SENDER_NAME", "@");
        let result = load_config(Some(&path));
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.namespace, "bank");
        assert_eq!(config.color, ColorMode::Always);
        assert_eq!(config.sender.kind, SenderKind::CommandBlock);
        assert_eq!(config.sender.name, "@");
    }

    #[test]
    #[serial]
    fn test_invalid_env_value_rejected() {
        clear_env();
        std::env::set_var("COLONEL_SENDER_KIND", "martian");
        let mut config = Config::default();
        let result = config.apply_env_vars();
        clear_env();

        assert!(
            matches!(result, Err(Error::InvalidConfig(msg)) if msg.contains("COLONEL_SENDER_KIND"))
        );
    }

    #[test]
    #[serial]
    fn test_empty_env_namespace_rejected() {
        clear_env();
        std::env::set_var("COLONEL_NAMESPACE", "  ");
        let mut config = Config::default();
        let result = config.apply_env_vars();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
