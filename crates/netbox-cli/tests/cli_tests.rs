#[cfg(test)]
mod tests {
    use clap::Parser;
    use netbox_cli::Cli;
    use netbox_config::EnvironmentOverrides;
    use netbox_config::env::ENV_REQUEST_TIMEOUT;
    use netbox_core::NetboxError;

    fn write_config(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netbox.toml");
        std::fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["netbox", "check", "--json", "-c", "/tmp/netbox.toml", "-v"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let cli = Cli::try_parse_from(["netbox", "-v", "-q", "check"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let cli = Cli::try_parse_from(["netbox", "--log-format", "xml", "schema"]);
        assert!(cli.is_err());
    }

    #[tokio::test]
    async fn test_check_succeeds_with_complete_config() {
        let (_dir, path) = write_config(
            r#"
server_url = "https://netbox.example.com/"
api_token = "0123456789abcdef"
"#,
        );
        let cli = Cli::try_parse_from(["netbox", "-q", "--config", path.as_str(), "check"]).unwrap();
        cli.run_with_env(EnvironmentOverrides::empty()).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_uses_injected_environment() {
        let (_dir, path) = write_config(
            r#"
server_url = "https://netbox.example.com"
api_token = "0123456789abcdef"
"#,
        );
        let env = EnvironmentOverrides::from_pairs([(ENV_REQUEST_TIMEOUT, "x")]);
        let cli = Cli::try_parse_from(["netbox", "-q", "--config", path.as_str(), "check"]).unwrap();
        let err = cli.run_with_env(env).await.unwrap_err();
        assert!(matches!(err, NetboxError::Rejected(1)));
    }

    #[tokio::test]
    async fn test_check_fails_on_empty_token() {
        // explicit empty values never fall back to the environment
        let (_dir, path) = write_config(
            r#"
server_url = ""
api_token = ""
"#,
        );
        let cli = Cli::try_parse_from(["netbox", "-q", "--config", path.as_str(), "check", "--json"]).unwrap();
        let err = cli.run_with_env(EnvironmentOverrides::empty()).await.unwrap_err();
        assert!(matches!(err, NetboxError::Rejected(2)));
    }

    #[tokio::test]
    async fn test_check_surfaces_parse_errors() {
        let (_dir, path) = write_config("server_url = [");
        let cli = Cli::try_parse_from(["netbox", "-q", "--config", path.as_str(), "check"]).unwrap();
        assert!(matches!(cli.run_with_env(EnvironmentOverrides::empty()).await, Err(NetboxError::Config(_))));
    }

    #[tokio::test]
    async fn test_schema_command() {
        let cli = Cli::try_parse_from(["netbox", "-q", "schema"]).unwrap();
        cli.run_with_env(EnvironmentOverrides::empty()).await.unwrap();
    }
}
