// Expiry discovery for the renewal primitive: the refresh response may omit
// the next expiry, in which case the identity probe supplies it; and a 401
// from the probe itself is terminal, never intercepted.

#[cfg(test)]
mod test {

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::client::ApiClient;
    use crate::config::settings::ClientConfig;
    use crate::helpers::time::now_i64;

    async fn probe_client(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::new(server.base_url()))
            .await
            .expect("api client")
    }

    #[tokio::test]
    async fn renewal_takes_expiry_from_refresh_response_when_present() {
        let server = MockServer::start_async().await;
        let exp = now_i64() + 3600;
        let refresh = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/refresh");
                then.status(200)
                    .json_body(json!({ "access_token": "t2", "access_token_exp": exp }));
            })
            .await;
        let client = probe_client(&server).await;
        let next = client.renew().await.expect("renewal succeeds");

        assert_eq!(next, Some(exp));
        let stored = client.store().get().await.expect("credential stored");
        assert_eq!(stored.token, "t2");
        assert_eq!(stored.expires_at, Some(exp));
        // no identity-probe fallback was mocked: the inline expiry sufficed
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn renewal_falls_back_to_identity_probe_for_expiry() {
        let server = MockServer::start_async().await;
        let exp = now_i64() + 1800;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/refresh");
                then.status(200).json_body(json!({ "access_token": "t2" }));
            })
            .await;
        let probe = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/me");
                then.status(200).json_body(json!({
                    "id": 1,
                    "username": "admin",
                    "access_token_exp": exp
                }));
            })
            .await;

        let client = probe_client(&server).await;
        let next = client.renew().await.expect("renewal succeeds");

        assert_eq!(next, Some(exp));
        let stored = client.store().get().await.expect("credential stored");
        assert_eq!(stored.token, "t2");
        assert_eq!(stored.expires_at, Some(exp));
        probe.assert_async().await;
    }

    #[tokio::test]
    async fn renewal_degrades_to_reactive_only_when_no_expiry_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/refresh");
                then.status(200).json_body(json!({ "access_token": "t2" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/me");
                then.status(500).body("down");
            })
            .await;

        let client = probe_client(&server).await;
        let next = client.renew().await.expect("renewal still succeeds");

        assert_eq!(next, None);
        let stored = client.store().get().await.expect("credential stored");
        assert_eq!(stored.token, "t2");
        assert_eq!(stored.expires_at, None);
    }

    #[tokio::test]
    async fn probe_401_after_renewal_is_terminal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/refresh");
                then.status(200).json_body(json!({ "access_token": "t2" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/me");
                then.status(401).body("unauthorized");
            })
            .await;

        let client = probe_client(&server).await;
        let err = client.renew().await.expect_err("probe 401 propagates");
        assert!(err.is_authorization());
    }
}
