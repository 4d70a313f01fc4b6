// The initial session check: only an explicit 401 logs the user out;
// transient backend failures leave the session undecided.

#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::routing::{get, post};
    use http::StatusCode;
    use serde_json::json;

    use crate::credentials::Credential;
    use crate::helpers::time::now_i64;
    use crate::session::SessionStatus;
    use crate::tests::common::{spawn_axum, test_client};

    #[tokio::test]
    async fn valid_session_is_authenticated_and_arms_the_timer() {
        let exp = now_i64() + 3600;
        let router = axum::Router::new().route(
            "/api/me",
            get(move || async move {
                let body = json!({
                    "id": 1,
                    "username": "admin",
                    "access_token_exp": exp
                })
                .to_string();
                (StatusCode::OK, body)
            }),
        );
        let (server, addr) = spawn_axum(router).await;

        let client = test_client(addr).await;
        assert_eq!(client.check_session().await, SessionStatus::Authenticated);
        assert!(client.pre_refresh_armed());

        client.cancel_pre_refresh();
        server.abort();
    }

    #[tokio::test]
    async fn explicit_401_clears_the_credential() {
        let router = axum::Router::new().route(
            "/api/me",
            get(|| async { (StatusCode::UNAUTHORIZED, "unauthorized".to_string()) }),
        );
        let (server, addr) = spawn_axum(router).await;

        let client = test_client(addr).await;
        client
            .store()
            .set(Credential::new("stale".into(), Some(now_i64() - 5)))
            .await;

        assert_eq!(client.check_session().await, SessionStatus::Unauthenticated);
        assert!(client.store().get().await.is_none());
        server.abort();
    }

    #[tokio::test]
    async fn backend_outage_is_indeterminate_not_a_logout() {
        let router = axum::Router::new().route(
            "/api/me",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down".to_string()) }),
        );
        let (server, addr) = spawn_axum(router).await;

        let client = test_client(addr).await;
        let kept = Credential::new("still-good".into(), Some(now_i64() + 600));
        client.store().set(kept.clone()).await;

        assert_eq!(client.check_session().await, SessionStatus::Indeterminate);
        // a 500 must not throw the user out
        assert_eq!(client.store().get().await, Some(kept));
        server.abort();
    }

    #[tokio::test]
    async fn logout_tears_down_locally_even_when_remote_succeeds() {
        let logout_calls = Arc::new(AtomicUsize::new(0));
        let logout_state = logout_calls.clone();
        let router = axum::Router::new().route(
            "/logout",
            post(move || {
                let calls = logout_state.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::OK, "bye".to_string())
                }
            }),
        );
        let (server, addr) = spawn_axum(router).await;

        let client = test_client(addr).await;
        client
            .store()
            .set(Credential::new("live".into(), Some(now_i64() + 3600)))
            .await;
        client.schedule_pre_refresh(now_i64() + 3600);

        client.logout().await;

        assert_eq!(logout_calls.load(Ordering::SeqCst), 1);
        assert!(client.store().get().await.is_none());
        assert!(!client.pre_refresh_armed());
        server.abort();
    }
}
