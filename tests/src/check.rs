use std::net::IpAddr;
use std::time::Duration;

use vhscan_common::{
    config::{Config, FailurePolicy},
    models::Protocol,
    network::target,
    status::StatusFilter,
};
use vhscan_core::scanner;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::util::{LOCALHOST, config_for};

fn expand_all(lines: &[&str]) -> Vec<IpAddr> {
    target::expand_all(lines).unwrap()
}

#[tokio::test]
async fn unreachable_ips_become_error_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("host", "intranet.example.com"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // 127.0.0.2 has no listener on the mock port.
    let ips = expand_all(&["127.0.0.1", "127.0.0.2"]);
    let cfg = Config {
        failure_policy: FailurePolicy::Record,
        timeout: Duration::from_secs(1),
        ..config_for(&server, StatusFilter::default())
    };
    let units = scanner::plan(&ips, &["intranet.example.com".to_string()], &[Protocol::Http]);

    let mut results = scanner::perform_scan(units, &cfg, None).await.unwrap();
    results.sort_by_key(|r| r.ip);

    assert_eq!(results.len(), 2);

    assert_eq!(results[0].ip, LOCALHOST);
    assert_eq!(results[0].status_code, 200);
    assert!(!results[0].is_error());

    assert_eq!(results[1].ip.to_string(), "127.0.0.2");
    assert_eq!(results[1].status_code, 0);
    assert!(results[1].is_error());
    assert_eq!(results[1].domain, "intranet.example.com");
}

#[tokio::test]
async fn errors_bypass_the_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ips = expand_all(&["127.0.0.1", "127.0.0.2"]);
    let cfg = Config {
        failure_policy: FailurePolicy::Record,
        timeout: Duration::from_secs(1),
        ..config_for(&server, StatusFilter::new([200], []))
    };
    let units = scanner::plan(&ips, &[String::new()], &[Protocol::Http]);

    let results = scanner::perform_scan(units, &cfg, None).await.unwrap();

    assert_eq!(results.len(), 1, "only the failure should survive: {results:?}");
    assert!(results[0].is_error());
    assert_eq!(results[0].domain, "");
}

#[tokio::test]
async fn range_lines_expand_into_probes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let ips = expand_all(&["127.0.0.1-3"]);
    assert_eq!(ips.len(), 3);

    let cfg = Config {
        timeout: Duration::from_secs(1),
        ..config_for(&server, StatusFilter::new([200], []))
    };
    let units = scanner::plan(&ips, &["example.com".to_string()], &[Protocol::Http]);
    let results = scanner::perform_scan(units, &cfg, None).await.unwrap();

    // Drop policy: only the listener on 127.0.0.1 answers.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].ip, LOCALHOST);
}

#[tokio::test]
async fn overlapping_lines_hit_each_address_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let ips = expand_all(&["127.0.0.1", "127.0.0.1-2"]);
    assert_eq!(ips.len(), 2);

    let cfg = Config {
        failure_policy: FailurePolicy::Record,
        timeout: Duration::from_secs(1),
        ..config_for(&server, StatusFilter::default())
    };
    let units = scanner::plan(&ips, &["example.com".to_string()], &[Protocol::Http]);
    let results = scanner::perform_scan(units, &cfg, None).await.unwrap();

    let for_localhost = results.iter().filter(|r| r.ip == LOCALHOST).count();
    assert_eq!(for_localhost, 1, "duplicate rows: {results:?}");
    assert_eq!(results.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
