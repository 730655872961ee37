//! End-to-end tests over the HTTP surface.
//!
//! The Prometheus recorder is process-global, so the whole scenario runs
//! in a single test against one spawned server.

use std::time::Duration;

use serde_json::Value;
use sre_demo::config::AppConfig;
use sre_demo::http::HttpServer;
use sre_demo::observability::metrics;
use tokio::sync::broadcast;

#[tokio::test]
async fn chain_over_http() {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    // Instant chain so the test does not sleep for real.
    config.chain.max_delay_secs = 0.0;
    config.telemetry.enabled = false;

    let metrics_handle = metrics::install_recorder().expect("recorder install");

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let server = HttpServer::new(config, metrics_handle);
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // Static greeting.
    let res = client.get(&base).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello, World!");

    // Five sequential chain invocations: 1-4 succeed, 5 hits the
    // injected failure but still answers 200.
    for call in 1..=5u64 {
        let res = client.get(format!("{base}/store")).send().await.unwrap();
        assert_eq!(res.status(), 200, "call {call} must not error at HTTP layer");

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["stores"][0]["name"], "My Store");
        assert_eq!(body["stores"][0]["items"][0]["name"], "Chair");
        assert_eq!(body["stores"][0]["items"][0]["price"], 15.99);

        let operation = body["operation"].as_str().unwrap();
        if call == 5 {
            assert_eq!(
                operation,
                "foo called -> goo encountered an error: \
                 Exception raised in goo on call 5"
            );
        } else {
            assert_eq!(
                operation,
                "foo called -> goo called -> zoo executed in 0.00 seconds"
            );
        }
    }

    // The gauge tracks the invocation counter exactly.
    let scrape = client
        .get(format!("{base}/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(
        scrape.contains("goo_function_calls_total 5"),
        "gauge should be 5 after 5 invocations:\n{scrape}"
    );
    assert!(scrape.contains("http_requests_total"));
    assert!(scrape.contains("http_request_duration_seconds"));

    // Two concurrent callers: no lost counter updates.
    let a = client.get(format!("{base}/store")).send();
    let b = client.get(format!("{base}/store")).send();
    let (ra, rb) = tokio::join!(a, b);
    assert_eq!(ra.unwrap().status(), 200);
    assert_eq!(rb.unwrap().status(), 200);

    let scrape = client
        .get(format!("{base}/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(
        scrape.contains("goo_function_calls_total 7"),
        "gauge should be 7 after 2 more invocations:\n{scrape}"
    );

    shutdown_tx.send(()).unwrap();
}
