// ipkeep: public address tracker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the address resolver using wiremock.
//!
//! Covers:
//! - First valid endpoint wins, in order
//! - HTTP errors, invalid bodies and timeouts are skipped and reported
//! - Exhaustion after `max_attempts` passes
//! - Cancellation of the wait loop

use ipkeep::error::{IpKeepError, NetworkError};
use ipkeep::net::resolver::{AddressResolver, Resolution};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn resolver(endpoints: Vec<String>) -> AddressResolver {
    AddressResolver::builder()
        .with_endpoints(endpoints)
        .with_timeout(Duration::from_millis(500))
        .with_retry_interval(Duration::from_millis(10))
        .build()
}

#[tokio::test]
async fn test_first_success_wins() {
    let server = MockServer::start().await;
    mount(&server, "/a", ResponseTemplate::new(200).set_body_string("203.0.113.7\n")).await;
    mount(&server, "/b", ResponseTemplate::new(200).set_body_string("198.51.100.1")).await;

    let a = format!("{}/a", server.uri());
    let b = format!("{}/b", server.uri());
    let resolution = resolver(vec![a.clone(), b]).resolve().await;

    let Resolution::Found(found) = resolution else {
        panic!("expected Found, got {resolution:?}");
    };
    assert_eq!(found.address, "203.0.113.7");
    assert_eq!(found.endpoint, a);
}

#[tokio::test]
async fn test_failures_are_skipped_in_order() {
    let server = MockServer::start().await;
    mount(&server, "/down", ResponseTemplate::new(503)).await;
    mount(&server, "/html", ResponseTemplate::new(200).set_body_string("<html>captive</html>")).await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string("192.0.2.1")
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    mount(&server, "/ok", ResponseTemplate::new(200).set_body_string("2001:db8::5\n")).await;

    let endpoints = ["/down", "/html", "/slow", "/ok"]
        .iter()
        .map(|p| format!("{}{p}", server.uri()))
        .collect();
    let resolution = resolver(endpoints).resolve().await;

    let Resolution::Found(found) = resolution else {
        panic!("expected Found, got {resolution:?}");
    };
    assert_eq!(found.address, "2001:db8::5");
    assert!(found.ip.is_ipv6());
}

#[tokio::test]
async fn test_all_failing_reports_each_endpoint() {
    let server = MockServer::start().await;
    mount(&server, "/down", ResponseTemplate::new(500)).await;
    mount(&server, "/empty", ResponseTemplate::new(200).set_body_string("")).await;

    let down = format!("{}/down", server.uri());
    let empty = format!("{}/empty", server.uri());
    let resolution = resolver(vec![down.clone(), empty.clone()]).resolve().await;

    let Resolution::Exhausted(failures) = resolution else {
        panic!("expected Exhausted, got {resolution:?}");
    };
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].endpoint, down);
    assert!(failures[0].reason.contains("http error 500"), "{}", failures[0]);
    assert_eq!(failures[1].endpoint, empty);
    assert!(failures[1].reason.contains("invalid address"), "{}", failures[1]);
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/slow",
        ResponseTemplate::new(200)
            .set_body_string("192.0.2.1")
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let slow = format!("{}/slow", server.uri());
    let resolution = AddressResolver::builder()
        .with_endpoints(vec![slow])
        .with_timeout(Duration::from_millis(200))
        .build()
        .resolve()
        .await;

    let Resolution::Exhausted(failures) = resolution else {
        panic!("expected Exhausted, got {resolution:?}");
    };
    assert!(failures[0].reason.contains("timeout"), "{}", failures[0]);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .and(header(
            "user-agent",
            format!("ipkeep/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.9"))
        .mount(&server)
        .await;

    let resolution = resolver(vec![format!("{}/ip", server.uri())]).resolve().await;
    assert!(matches!(resolution, Resolution::Found(_)), "{resolution:?}");
}

#[tokio::test]
async fn test_wait_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let resolver = AddressResolver::builder()
        .with_endpoints(vec![format!("{}/down", server.uri())])
        .with_retry_interval(Duration::from_millis(10))
        .with_max_attempts(3)
        .build();
    let err = resolver
        .wait_for_address(&CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        IpKeepError::Network(boxed) => match *boxed {
            NetworkError::Exhausted { attempts } => assert_eq!(attempts, 3),
            other => panic!("expected Exhausted, got {other:?}"),
        },
        other => panic!("expected IpKeepError::Network, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_recovers_when_endpoint_comes_up() {
    let server = MockServer::start().await;
    // First request fails, later ones succeed
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount(&server, "/flaky", ResponseTemplate::new(200).set_body_string("203.0.113.50")).await;

    let found = resolver(vec![format!("{}/flaky", server.uri())])
        .wait_for_address(&CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(found.address, "203.0.113.50");
}

#[tokio::test]
async fn test_wait_is_cancellable() {
    let server = MockServer::start().await;
    mount(&server, "/down", ResponseTemplate::new(500)).await;

    let resolver = AddressResolver::builder()
        .with_endpoints(vec![format!("{}/down", server.uri())])
        .with_retry_interval(Duration::from_secs(60))
        .build();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = resolver.wait_for_address(&cancel).await.unwrap_err();
    assert!(
        matches!(&err, IpKeepError::Network(boxed) if matches!(**boxed, NetworkError::Interrupted)),
        "expected Interrupted, got {err:?}"
    );
}
