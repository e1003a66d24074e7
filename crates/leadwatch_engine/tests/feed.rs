use std::time::Duration;

use leadwatch_engine::{ApiClient, ApiError, ApiSettings, LogFeed, ReqwestLogFeed};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_for(server: &MockServer) -> ReqwestLogFeed {
    let settings = ApiSettings {
        base_url: server.uri(),
        feed_timeout: Duration::from_millis(200),
        ..ApiSettings::default()
    };
    ReqwestLogFeed::new(ApiClient::new(settings).expect("client"))
}

#[tokio::test]
async fn feed_reads_configured_stream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/debug/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": {
                "scraper_debug.log": ["[10:00:00] SCRAPER START", "ACTION REQUIRED: enter code"],
                "agent.log": ["unrelated"]
            }
        })))
        .mount(&server)
        .await;

    let snapshot = feed_for(&server).fetch_snapshot().await.expect("snapshot");
    assert_eq!(snapshot.stream, "scraper_debug.log");
    assert_eq!(
        snapshot.lines,
        vec!["[10:00:00] SCRAPER START", "ACTION REQUIRED: enter code"]
    );
}

#[tokio::test]
async fn missing_stream_is_an_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/debug/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let snapshot = feed_for(&server).fetch_snapshot().await.expect("snapshot");
    assert!(snapshot.lines.is_empty());
}

#[tokio::test]
async fn http_error_skips_the_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/debug/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    assert_eq!(
        feed.try_fetch().await.unwrap_err(),
        ApiError::HttpStatus {
            status: 503,
            detail: "Server returned 503".to_string()
        }
    );
    assert!(feed.fetch_snapshot().await.is_none());
}

#[tokio::test]
async fn slow_status_times_out_and_skips_the_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/debug/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "logs": [] })),
        )
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    assert_eq!(feed.try_fetch().await.unwrap_err(), ApiError::Timeout);
    assert!(feed.fetch_snapshot().await.is_none());
}

#[tokio::test]
async fn unreachable_host_skips_the_cycle() {
    let settings = ApiSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        feed_timeout: Duration::from_millis(200),
        ..ApiSettings::default()
    };
    let feed = ReqwestLogFeed::new(ApiClient::new(settings).expect("client"));
    assert!(feed.fetch_snapshot().await.is_none());
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    };
    assert!(matches!(
        ApiClient::new(settings),
        Err(ApiError::InvalidUrl(_))
    ));
}
