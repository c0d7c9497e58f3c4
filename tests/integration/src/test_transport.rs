//! Client tests against an in-process verifying transport.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use http::StatusCode;
    use parking_lot::Mutex;
    use rustpush_auth::{hash_body, verify};
    use rustpush_client::{HttpRequest, HttpResponse, HttpTransport, PushClient, TriggerOutcome};
    use rustpush_core::{ClientConfig, Credentials, PushResult};
    use serde_json::json;

    /// Transport that checks signatures the way the service does.
    #[derive(Debug)]
    struct VerifyingTransport {
        secret: Vec<u8>,
        accepted: Mutex<Vec<String>>,
    }

    impl VerifyingTransport {
        fn new(secret: &str) -> Arc<Self> {
            Arc::new(Self {
                secret: secret.as_bytes().to_vec(),
                accepted: Mutex::new(Vec::new()),
            })
        }

        fn accepted(&self) -> usize {
            self.accepted.lock().len()
        }

        fn is_authentic(&self, request: &HttpRequest) -> bool {
            let Some(signature) = request.query_param("auth_signature") else {
                return false;
            };
            if let Some(body) = &request.body {
                if request.query_param("body_md5") != Some(hash_body(body.as_bytes()).as_str()) {
                    return false;
                }
            }

            let params: BTreeMap<&str, &str> = request
                .query
                .iter()
                .filter(|(k, _)| k != "auth_signature")
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let query = params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            let path = format!("/{}", request.url.splitn(4, '/').nth(3).unwrap_or_default());
            let string_to_sign = format!("{}\n{path}\n{query}", request.method);

            verify(&self.secret, &string_to_sign, signature)
        }
    }

    impl HttpTransport for VerifyingTransport {
        fn send(&self, request: HttpRequest) -> PushResult<HttpResponse> {
            if !self.is_authentic(&request) {
                return Ok(HttpResponse {
                    status: http_status(401),
                    body: "Invalid signature".to_owned(),
                });
            }
            self.accepted.lock().push(request.url.clone());
            let body = if request.url.ends_with("/channels") {
                r#"{"channels":{"presence-lobby":{"user_count":2}}}"#
            } else {
                "{}"
            };
            Ok(HttpResponse {
                status: http_status(200),
                body: body.to_owned(),
            })
        }
    }

    fn http_status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    fn client(secret: &str, transport: Arc<VerifyingTransport>) -> PushClient {
        PushClient::with_transport(
            Credentials::new(7_u64, "key", secret),
            ClientConfig::default(),
            transport,
        )
    }

    #[test]
    fn test_should_pass_service_signature_check() {
        let transport = VerifyingTransport::new("secret");
        let client = client("secret", transport.clone());

        let outcome = client
            .trigger(&["my-channel"], "my-event", &json!({"message": "hello"}))
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Flag(true));

        let channels = client
            .get_channels(&[("filter_by_prefix", "presence-"), ("info", "user_count")])
            .unwrap()
            .unwrap();
        assert_eq!(channels["presence-lobby"].user_count, Some(2));
        assert_eq!(transport.accepted(), 2);
    }

    #[test]
    fn test_should_report_wrong_secret_as_soft_failure() {
        let transport = VerifyingTransport::new("secret");
        let client = client("not-the-secret", transport.clone());

        let outcome = client
            .trigger(&["my-channel"], "my-event", &json!({}))
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Flag(false));
        assert!(client.get_channels(&[]).unwrap().is_none());
        assert!(client.get_channel_info("my-channel", &[]).unwrap().is_none());
        assert!(client.get("/channels", &[]).unwrap().is_none());
        assert_eq!(transport.accepted(), 0);
    }

    #[test]
    fn test_should_sign_concurrent_calls_independently() {
        let transport = VerifyingTransport::new("secret");
        let client = client("secret", transport.clone());

        std::thread::scope(|scope| {
            for i in 0..8 {
                let client = &client;
                scope.spawn(move || {
                    let channel = format!("channel-{i}");
                    let outcome = client
                        .trigger(&[channel.as_str()], "tick", &json!({"i": i}))
                        .unwrap();
                    assert!(outcome.is_success());
                });
            }
        });

        assert_eq!(transport.accepted(), 8);
    }
}
