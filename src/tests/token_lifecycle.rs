#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use http::Method;
    use serde_json::json;

    use crate::error::{ClientError, TransportError};
    use crate::tests::common::*;
    use crate::{Credentials, EversendClient, TokenState};

    #[tokio::test]
    async fn valid_cached_token_needs_no_network_call() {
        let transport = api_mock(|_, _| respond(500, json!({"message": "unexpected"})));
        let client = client_with(transport.clone());

        let first = client.token_manager().get_valid_token().await.unwrap();
        let second = client.token_manager().get_valid_token().await.unwrap();

        assert_eq!(first, "tok-1");
        assert_eq!(second, "tok-1");
        assert_eq!(transport.total_calls(), 1);
        assert_eq!(client.metrics().auth_refreshes.get(), 1);
    }

    #[tokio::test]
    async fn auth_request_carries_credentials_as_headers() {
        let transport = api_mock(|_, _| respond(500, json!({"message": "unexpected"})));
        let client = client_with(transport.clone());

        client.token_manager().get_valid_token().await.unwrap();

        let request = transport.last_request_to("auth/token").unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(header(&request, "clientId"), Some(CLIENT_ID));
        assert_eq!(header(&request, "clientSecret"), Some(CLIENT_SECRET));
        assert!(request.headers.get("authorization").is_none());
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn expired_token_triggers_exactly_one_refresh_per_call() {
        let transport = Arc::new(MockTransport::new(|_, _| {
            respond(200, auth_body("stale", Utc::now() - chrono::Duration::seconds(1)))
        }));
        let client = client_with(transport.clone());

        client.token_manager().get_valid_token().await.unwrap();
        assert_eq!(transport.calls_to("auth/token"), 1);
        assert_eq!(
            client.token_manager().cached_token().await.state_at(Utc::now(), chrono::Duration::zero()),
            TokenState::Expired
        );

        client.token_manager().get_valid_token().await.unwrap();
        assert_eq!(transport.calls_to("auth/token"), 2);
    }

    #[tokio::test]
    async fn unparsable_expiry_keeps_token_but_forces_refresh() {
        let transport = Arc::new(MockTransport::new(|_, _| {
            respond(200, json!({"token": "odd-expiry", "expires": "in an hour"}))
        }));
        let client = client_with(transport.clone());

        let token = client.token_manager().get_valid_token().await.unwrap();
        assert_eq!(token, "odd-expiry");

        let cached = client.token_manager().cached_token().await;
        assert_eq!(cached.value, "odd-expiry");
        assert_eq!(cached.expires_at, None);

        client.token_manager().get_valid_token().await.unwrap();
        assert_eq!(transport.calls_to("auth/token"), 2);
    }

    #[tokio::test]
    async fn rejected_credentials_leave_token_unset() {
        let transport = Arc::new(MockTransport::new(|_, _| {
            respond(401, json!({"message": "invalid credentials"}))
        }));
        let client = client_with(transport.clone());

        let err = client.token_manager().get_valid_token().await.unwrap_err();
        match err {
            ClientError::Auth { status, ref message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid credentials");
            }
            other => panic!("expected auth error, got {other:?}"),
        }

        let cached = client.token_manager().cached_token().await;
        assert_eq!(cached.state_at(Utc::now(), chrono::Duration::zero()), TokenState::Empty);
        assert_eq!(client.metrics().auth_failures.get(), 1);
    }

    #[tokio::test]
    async fn auth_failure_without_message_is_decode_error() {
        let transport = Arc::new(MockTransport::new(|_, _| respond(403, json!({"error": "forbidden"}))));
        let client = client_with(transport);

        let err = client.token_manager().get_valid_token().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn success_without_token_field_is_decode_error() {
        let transport = Arc::new(MockTransport::new(|_, _| respond(200, json!({"expires": "2030-01-01T00:00:00Z"}))));
        let client = client_with(transport);

        let err = client.token_manager().get_valid_token().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
        assert!(client.token_manager().cached_token().await.value.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced_as_is() {
        let transport = Arc::new(MockTransport::new(|_, _| Err(TransportError::Other("connection reset".into()))));
        let client = client_with(transport);

        let err = client.token_manager().get_valid_token().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
        assert!(err.is_retryable());
        assert!(client.token_manager().cached_token().await.value.is_empty());
    }

    #[tokio::test]
    async fn invalidate_forces_next_refresh() {
        let transport = api_mock(|_, _| respond(500, json!({"message": "unexpected"})));
        let client = client_with(transport.clone());

        assert_eq!(client.token_manager().get_valid_token().await.unwrap(), "tok-1");
        client.token_manager().invalidate().await;
        assert_eq!(client.token_manager().get_valid_token().await.unwrap(), "tok-2");
        assert_eq!(transport.calls_to("auth/token"), 2);
    }

    #[tokio::test]
    async fn expiry_skew_refreshes_early() {
        let transport = Arc::new(MockTransport::new(|_, _| {
            respond(200, auth_body("short", Utc::now() + chrono::Duration::seconds(10)))
        }));
        let client = EversendClient::builder(Credentials::new(CLIENT_ID, CLIENT_SECRET))
            .base_url(BASE_URL)
            .expiry_skew(Duration::from_secs(30))
            .transport(transport.clone())
            .build_with_transport()
            .unwrap();

        client.token_manager().get_valid_token().await.unwrap();
        client.token_manager().get_valid_token().await.unwrap();
        assert_eq!(transport.calls_to("auth/token"), 2);
    }

    #[tokio::test]
    async fn refreshed_token_is_used_as_bearer() {
        let transport = api_mock(|_, _| respond(200, json!({"data": {"name": "Acme"}})));
        let client = client_with(transport.clone());

        let profile = client.account().profile().await.unwrap();
        assert_eq!(profile.get("name"), Some(&json!("Acme")));

        let request = transport.last_request_to("account").unwrap();
        assert_eq!(header(&request, "authorization"), Some("Bearer tok-1"));
    }
}
