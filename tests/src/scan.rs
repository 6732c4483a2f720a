use std::time::{Duration, Instant};

use vhscan_common::{
    config::{Config, FailurePolicy},
    models::{ProbeResult, Protocol},
    status::StatusFilter,
};
use vhscan_core::scanner;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::util::{LOCALHOST, config_for, domains};

/// 200 for `example.com`, 404 for any other Host.
async fn vhost_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("host", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn finds_the_matching_virtual_host() {
    let server = vhost_server().await;
    let cfg = config_for(&server, StatusFilter::new([200], []));
    let units = scanner::plan(
        &[LOCALHOST],
        &domains(&["example.com", "www.example.com", "admin.example.com"]),
        &Protocol::ALL,
    );

    let results: Vec<ProbeResult> = scanner::perform_scan(units, &cfg, None).await.unwrap();

    assert_eq!(results.len(), 1, "unexpected results: {results:?}");
    let hit = &results[0];
    assert_eq!(hit.domain, "example.com");
    assert_eq!(hit.ip, LOCALHOST);
    assert_eq!(hit.protocol, Protocol::Http);
    assert_eq!(hit.status_code, 200);
    assert!(hit.error.is_none());

    // Every http probe reached the server; https probes hit the dead port.
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
}

#[tokio::test]
async fn host_header_carries_the_candidate_domain() {
    let server = vhost_server().await;
    let cfg = config_for(&server, StatusFilter::default());
    let units = scanner::plan(&[LOCALHOST], &domains(&["a.example.com", "b.example.com"]), &[Protocol::Http]);

    scanner::perform_scan(units, &cfg, None).await.unwrap();

    let mut hosts: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|req| req.headers.get("host"))
        .filter_map(|value| value.to_str().ok().map(String::from))
        .collect();
    hosts.sort();
    assert_eq!(hosts, vec!["a.example.com", "b.example.com"]);
}

#[tokio::test]
async fn empty_domain_sends_no_override() {
    let server = vhost_server().await;
    let cfg = config_for(&server, StatusFilter::default());
    let units = scanner::plan(&[LOCALHOST], &domains(&[""]), &[Protocol::Http]);

    let results = scanner::perform_scan(units, &cfg, None).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].domain, "");
    assert_eq!(results[0].status_code, 404);

    let received = server.received_requests().await.unwrap();
    let host = received[0].headers.get("host").and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(host.starts_with("127.0.0.1"), "unexpected Host header: {host}");
}

#[tokio::test]
async fn include_and_exclude_sets_filter_codes() {
    let server = MockServer::start().await;
    for (host, status) in [("example.com", 200), ("old.example.com", 301), ("admin.example.com", 403)] {
        Mock::given(method("GET"))
            .and(header("host", host))
            .respond_with(ResponseTemplate::new(status).insert_header("location", "/elsewhere"))
            .mount(&server)
            .await;
    }

    let cfg = config_for(&server, StatusFilter::new([200, 301, 403], [403]));
    let units = scanner::plan(
        &[LOCALHOST],
        &domains(&["example.com", "old.example.com", "admin.example.com"]),
        &[Protocol::Http],
    );

    let mut results = scanner::perform_scan(units, &cfg, None).await.unwrap();
    results.sort_by(|a, b| a.domain.cmp(&b.domain));

    let kept: Vec<(&str, u16)> = results.iter().map(|r| (r.domain.as_str(), r.status_code)).collect();
    assert_eq!(kept, vec![("example.com", 200), ("old.example.com", 301)]);
}

#[tokio::test]
async fn timed_out_probes_are_dropped_and_scan_terminates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let cfg = Config {
        concurrency: 2,
        timeout: Duration::from_millis(250),
        ..config_for(&server, StatusFilter::new([200], []))
    };
    let units = scanner::plan(&[LOCALHOST], &domains(&["a.test", "b.test", "c.test", "d.test"]), &[Protocol::Http]);

    let started = Instant::now();
    let results = scanner::perform_scan(units, &cfg, None).await.unwrap();

    assert!(results.is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "scan took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn record_policy_keeps_failed_https_probes() {
    let server = vhost_server().await;
    let cfg = Config {
        failure_policy: FailurePolicy::Record,
        ..config_for(&server, StatusFilter::new([200], []))
    };
    let units = scanner::plan(&[LOCALHOST], &domains(&["example.com"]), &Protocol::ALL);

    let mut results = scanner::perform_scan(units, &cfg, None).await.unwrap();
    results.sort_by_key(|r| r.protocol);

    assert_eq!(results.len(), 2);
    assert_eq!((results[0].protocol, results[0].status_code), (Protocol::Http, 200));
    assert_eq!((results[1].protocol, results[1].status_code), (Protocol::Https, 0));
    assert!(results[1].error.is_some());
}
