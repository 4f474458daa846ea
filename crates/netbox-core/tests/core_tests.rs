#[cfg(test)]
mod tests {
    use netbox_core::*;

    fn missing(field: &str) -> Diagnostic {
        Diagnostic::error(
            DiagnosticKind::MissingRequiredValue,
            field,
            "Missing value",
            "set it",
        )
    }

    fn stripped() -> Diagnostic {
        Diagnostic::warning(
            DiagnosticKind::NormalizationWarning,
            "strip_trailing_slashes_from_url",
            "Stripped trailing slashes",
            "",
        )
    }

    // ── Diagnostics tests ──────────────────────────────────────

    #[test]
    fn test_diagnostics_accumulate_in_order() {
        let mut diags = Diagnostics::new();
        diags.push(missing("server_url"));
        diags.push(stripped());
        diags.push(missing("api_token"));
        assert_eq!(diags.len(), 3);
        let fields: Vec<&str> = diags.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["server_url", "strip_trailing_slashes_from_url", "api_token"]);
    }

    #[test]
    fn test_has_error_ignores_warnings() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_error());
        diags.push(stripped());
        assert!(!diags.has_error());
        assert_eq!(diags.warnings().count(), 1);
        diags.push(missing("api_token"));
        assert!(diags.has_error());
        assert_eq!(diags.error_count(), 1);
    }

    #[test]
    fn test_finish_rejects_on_error() {
        let mut diags = Diagnostics::new();
        diags.push(stripped());
        diags.push(missing("server_url"));
        let err = diags.finish(42).unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_finish_keeps_warnings_on_success() {
        let mut diags = Diagnostics::new();
        diags.push(stripped());
        let ok = diags.finish("value").unwrap();
        assert_eq!(ok.value, "value");
        assert_eq!(ok.warnings.len(), 1);
        assert!(!ok.warnings.has_error());
    }

    #[test]
    fn test_for_field_matches_nested_paths() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::error(
            DiagnosticKind::InvalidValue,
            FieldPath::root("headers").child("X-Bad Name"),
            "Invalid header name",
            "",
        ));
        diags.push(missing("server_url"));
        assert_eq!(diags.for_field("headers").count(), 1);
        assert_eq!(diags.for_field("server_url").count(), 1);
        assert_eq!(diags.for_field("api_token").count(), 0);
    }

    #[test]
    fn test_diagnostic_display_includes_detail() {
        let d = missing("api_token");
        let text = d.to_string();
        assert!(text.contains("api_token: Missing value"));
        assert!(text.contains("↳ set it"));
    }

    #[test]
    fn test_diagnostics_serialize_as_list() {
        let mut diags = Diagnostics::new();
        diags.push(missing("server_url"));
        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json[0]["field"], "server_url");
        assert_eq!(json[0]["severity"], "error");
        assert_eq!(json[0]["kind"], "missing_required_value");
    }

    #[test]
    fn test_into_error_counts_errors() {
        let mut diags = Diagnostics::new();
        diags.push(missing("server_url"));
        diags.push(missing("api_token"));
        diags.push(stripped());
        let err = diags.into_error();
        assert!(matches!(err, NetboxError::Rejected(2)));
    }

    // ── Type tests ─────────────────────────────────────────────

    #[test]
    fn test_field_path_child() {
        let p = FieldPath::root("headers").child("X-Trace");
        assert_eq!(p.as_str(), "headers.X-Trace");
        assert_eq!(p.root_name(), "headers");
    }

    #[test]
    fn test_secret_is_redacted() {
        let s = Secret::new("0123456789abcdef");
        assert_eq!(format!("{s:?}"), "Secret(***)");
        assert_eq!(s.to_string(), "***");
        assert_eq!(s.expose(), "0123456789abcdef");
    }

    // ── Error tests ────────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = NetboxError::Api {
            status: 403,
            body: "Invalid token".into(),
        };
        assert_eq!(err.to_string(), "netbox api returned 403: Invalid token");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: NetboxError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
