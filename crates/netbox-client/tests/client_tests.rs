#[cfg(test)]
mod tests {
    use netbox_client::*;
    use netbox_config::raw::keys;
    use netbox_config::{ConfigResolver, EnvironmentOverrides, RawConfig, ResolvedConfig};
    use netbox_core::{DiagnosticKind, NetboxError};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn resolve(raw: RawConfig) -> ResolvedConfig {
        ConfigResolver::new(EnvironmentOverrides::empty())
            .resolve(&raw)
            .unwrap()
            .value
    }

    fn config(url: &str) -> ResolvedConfig {
        resolve(RawConfig::new().with_server_url(url).with_api_token("abc123"))
    }

    /// Accept one connection, capture the request head, reply with `status` and `body`.
    async fn serve_once(listener: TcpListener, status: &'static str, body: &'static str) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[derive(Default)]
    struct RecordingHook {
        events: Mutex<Vec<String>>,
    }

    impl TransportHook for RecordingHook {
        fn on_request(&self, method: &reqwest::Method, url: &url::Url) {
            self.events.lock().push(format!("request {method} {}", url.path()));
        }

        fn on_response(&self, method: &reqwest::Method, url: &url::Url, status: u16, _elapsed: Duration) {
            self.events
                .lock()
                .push(format!("response {method} {} {status}", url.path()));
        }

        fn on_error(&self, method: &reqwest::Method, url: &url::Url, _error: &str) {
            self.events.lock().push(format!("error {method} {}", url.path()));
        }
    }

    // ── URL parsing ────────────────────────────────────────────

    #[test]
    fn test_malformed_url_is_diagnostic() {
        let diags = bootstrap(&config("not a url")).unwrap_err();
        assert_eq!(diags.error_count(), 1);
        let d = diags.errors().next().unwrap();
        assert_eq!(d.kind, DiagnosticKind::MalformedUrl);
        assert_eq!(d.field.as_str(), keys::SERVER_URL);
    }

    #[test]
    fn test_unsupported_scheme_is_malformed() {
        let diags = bootstrap(&config("ftp://netbox.example.com")).unwrap_err();
        assert_eq!(
            diags.errors().next().map(|d| d.kind),
            Some(DiagnosticKind::MalformedUrl)
        );
    }

    #[test]
    fn test_host_and_port_without_scheme_defaults_to_http() {
        for (input, expected) in [
            ("netbox.local:8000", "http://netbox.local:8000/api/"),
            ("localhost:8000", "http://localhost:8000/api/"),
            ("netbox.example.com/netbox", "http://netbox.example.com/netbox/api/"),
        ] {
            let built = bootstrap(&config(input)).unwrap();
            assert_eq!(built.value.base_url().as_str(), expected, "{input}");
            assert_eq!(built.value.schemes(), &[Scheme::Http]);
            let warnings: Vec<_> = built.warnings.iter().collect();
            assert_eq!(warnings.len(), 1);
            assert_eq!(warnings[0].kind, DiagnosticKind::NormalizationWarning);
            assert_eq!(warnings[0].field.as_str(), keys::SERVER_URL);
            assert!(warnings[0].detail.contains("http://"));
        }
    }

    #[test]
    fn test_explicit_scheme_raises_no_scheme_warning() {
        let built = bootstrap(&config("https://netbox.local:8443")).unwrap();
        assert!(built.warnings.is_empty());
        assert_eq!(built.value.schemes(), &[Scheme::Https]);
    }

    #[test]
    fn test_base_path_appended_to_root_url() {
        let transport = ClientBootstrapper::new()
            .build_transport(&config("https://netbox.example.com"))
            .unwrap()
            .value;
        assert_eq!(transport.host(), "netbox.example.com");
        assert_eq!(transport.base_path(), "/api/");
        assert_eq!(transport.schemes(), &[Scheme::Https]);
        assert_eq!(transport.base_url().as_str(), "https://netbox.example.com/api/");
    }

    #[test]
    fn test_base_path_keeps_url_prefix() {
        let transport = ClientBootstrapper::new()
            .build_transport(&config("https://example.com/netbox"))
            .unwrap()
            .value;
        assert_eq!(transport.base_path(), "/netbox/api/");
        assert_eq!(
            transport.endpoint("dcim/devices/").unwrap().as_str(),
            "https://example.com/netbox/api/dcim/devices/"
        );
        assert_eq!(
            transport.endpoint("/ipam/prefixes/7/").unwrap().as_str(),
            "https://example.com/netbox/api/ipam/prefixes/7/"
        );
    }

    #[test]
    fn test_scheme_set_is_exactly_the_parsed_scheme() {
        let handle = bootstrap(&config("http://10.0.0.5:8000")).unwrap().value;
        assert_eq!(handle.schemes(), &[Scheme::Http]);
        assert_eq!(handle.base_url().as_str(), "http://10.0.0.5:8000/api/");
    }

    #[test]
    fn test_endpoint_rejects_other_scheme_and_escapes() {
        let transport = ClientBootstrapper::new()
            .build_transport(&config("http://netbox.local/netbox"))
            .unwrap()
            .value;
        assert!(matches!(
            transport.endpoint("https://netbox.local/netbox/api/status/"),
            Err(NetboxError::SchemeNotAllowed { .. })
        ));
        assert!(matches!(
            transport.endpoint("../../admin/"),
            Err(NetboxError::InvalidPath { .. })
        ));
        assert!(matches!(
            transport.endpoint("http://elsewhere.local/netbox/api/"),
            Err(NetboxError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_timeout_and_insecure_flag_carried() {
        let cfg = resolve(
            RawConfig::new()
                .with_server_url("https://netbox.example.com")
                .with_api_token("abc123")
                .with_request_timeout(3)
                .with_allow_insecure_https(true),
        );
        let built = ClientBootstrapper::new().build_transport(&cfg).unwrap();
        assert_eq!(built.value.timeout(), Duration::from_secs(3));
        assert!(built.value.is_insecure());
        let warnings: Vec<_> = built.warnings.iter().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::InsecureTransport);
        assert!(warnings[0].summary.contains("disabled"));
    }

    #[test]
    fn test_insecure_flag_on_http_warns() {
        let cfg = resolve(
            RawConfig::new()
                .with_server_url("http://netbox.local")
                .with_api_token("abc123")
                .with_allow_insecure_https(true),
        );
        let built = ClientBootstrapper::new().build_transport(&cfg).unwrap();
        assert!(!built.value.is_insecure());
        let warnings: Vec<_> = built.warnings.iter().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, DiagnosticKind::InsecureTransport);
        assert!(warnings[0].summary.contains("no effect"));
    }

    // ── Header construction ────────────────────────────────────

    #[test]
    fn test_header_and_url_failures_accumulate() {
        let cfg = resolve(
            RawConfig::new()
                .with_server_url("not a url")
                .with_api_token("abc\n123")
                .with_header("X Bad Name", "value"),
        );
        let diags = bootstrap(&cfg).unwrap_err();
        assert_eq!(diags.error_count(), 3);
        assert_eq!(
            diags.for_field(keys::API_TOKEN).next().map(|d| d.kind),
            Some(DiagnosticKind::TransportConstructionFailure)
        );
        assert_eq!(
            diags.for_field(keys::HEADERS).next().map(|d| d.field.as_str()),
            Some("headers.X Bad Name")
        );
    }

    // ── Requests ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_bootstrap_opens_no_connection_until_first_request() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cfg = resolve(
            RawConfig::new()
                .with_server_url(format!("http://{addr}/"))
                .with_api_token("abc123")
                .with_header("X-Request-Source", "tests"),
        );

        let handle = bootstrap(&cfg).unwrap().value;
        let idle = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(idle.is_err(), "bootstrap must not connect");

        let server = tokio::spawn(serve_once(listener, "200 OK", r#"{"netbox-version":"4.1.0"}"#));
        let status = handle.status().await.unwrap();
        assert_eq!(status["netbox-version"], "4.1.0");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/status/ HTTP/1.1"), "{request}");
        let lower = request.to_lowercase();
        assert!(lower.contains("authorization: token abc123"), "{request}");
        assert!(lower.contains("x-request-source: tests"), "{request}");
        assert!(lower.contains("accept: application/json"), "{request}");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = bootstrap(&config(&format!("http://{addr}"))).unwrap().value;

        let server = tokio::spawn(serve_once(
            listener,
            "403 Forbidden",
            r#"{"detail":"Invalid token."}"#,
        ));
        let err = handle.get("dcim/sites/").await.unwrap_err();
        server.await.unwrap();
        match err {
            NetboxError::Api { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("Invalid token."));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_hook_sees_request_and_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hook = Arc::new(RecordingHook::default());
        let handle = ClientBootstrapper::with_hook(hook.clone())
            .bootstrap(&config(&format!("http://{addr}")))
            .unwrap()
            .value;

        let server = tokio::spawn(serve_once(listener, "200 OK", "{}"));
        handle.get("dcim/sites/").await.unwrap();
        server.await.unwrap();

        let events = hook.events.lock().clone();
        assert_eq!(
            events,
            [
                "request GET /api/dcim/sites/".to_string(),
                "response GET /api/dcim/sites/ 200".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let hook = Arc::new(RecordingHook::default());
        let handle = ClientBootstrapper::with_hook(hook.clone())
            .bootstrap(&config(&format!("http://{addr}")))
            .unwrap()
            .value;
        let err = handle.status().await.unwrap_err();
        assert!(matches!(err, NetboxError::Transport(_)));
        assert_eq!(hook.events.lock().last().map(String::as_str), Some("error GET /api/status/"));
    }

    // ── Handle & mock ──────────────────────────────────────────

    #[test]
    fn test_handle_clones_share_client() {
        let handle = bootstrap(&config("https://netbox.example.com")).unwrap().value;
        let clone = handle.clone();
        assert!(Arc::ptr_eq(&handle.as_arc(), &clone.as_arc()));
        assert!(format!("{handle:?}").contains("https://netbox.example.com/api/"));
    }

    #[tokio::test]
    async fn test_mock_client_records_requests() {
        let mock = MockClient::new()
            .with_response(serde_json::json!({"id": 7}))
            .with_api_error(404, "Not found.");
        let requests = mock.requests.clone();
        let handle = ClientHandle::new(mock);

        let created = handle
            .post("dcim/sites/", &serde_json::json!({"name": "dc1"}))
            .await
            .unwrap();
        assert_eq!(created["id"], 7);
        let missing = handle.get("dcim/sites/7/").await;
        assert!(matches!(missing, Err(NetboxError::Api { status: 404, .. })));

        let recorded = requests.lock();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].body, Some(serde_json::json!({"name": "dc1"})));
        assert_eq!(recorded[1].path, "dcim/sites/7/");
    }
}
