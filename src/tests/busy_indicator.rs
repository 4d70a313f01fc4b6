// The shared busy counter behind the global loading indicator: rises with
// the first in-flight call, falls to exactly zero after the last one, error
// paths included.

#[cfg(test)]
mod test {

    use std::time::Duration;

    use axum::routing::get;
    use http::StatusCode;

    use crate::client::request::ApiRequest;
    use crate::tests::common::{spawn_axum, test_client};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn busy_flag_rises_and_settles_to_idle() {
        let router = axum::Router::new().route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                (StatusCode::OK, "ok".to_string())
            }),
        );
        let (server, addr) = spawn_axum(router).await;

        let client = test_client(addr).await;
        let mut busy = client.busy_watch();
        assert!(!*busy.borrow());

        let mut calls = Vec::new();
        for path in ["/api/slow", "/api/slow", "/api/missing"] {
            let client = client.clone();
            let req = ApiRequest::get(path);
            calls.push(tokio::spawn(async move { client.request(req).await }));
        }

        // the first dispatch flips the flag
        tokio::time::timeout(Duration::from_secs(2), busy.changed())
            .await
            .expect("busy flag should rise")
            .unwrap();
        assert!(*busy.borrow());

        for call in calls {
            let _ = call.await.expect("task");
        }

        // /api/missing failed with a 404, but every exit path decrements
        tokio::time::timeout(Duration::from_secs(2), async {
            while *busy.borrow_and_update() {
                busy.changed().await.unwrap();
            }
        })
        .await
        .expect("busy flag should settle");

        assert_eq!(client.in_flight(), 0);
        server.abort();
    }
}
