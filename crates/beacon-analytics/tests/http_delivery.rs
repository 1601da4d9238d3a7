// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end delivery tests against a mock ingestion server.

use std::time::Duration;

use beacon_analytics::{
	DeliveryOutcome, DeliveryReport, HttpTransport, Platform, Properties, Tracker, TrackerConfig,
	Transport,
};
use serde_json::Value;
use tokio::sync::broadcast;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_report(rx: &mut broadcast::Receiver<DeliveryReport>) -> DeliveryReport {
	tokio::time::timeout(Duration::from_secs(5), rx.recv())
		.await
		.expect("report timed out")
		.expect("report channel closed")
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
	server
		.received_requests()
		.await
		.unwrap_or_default()
		.iter()
		.map(|r| serde_json::from_slice(&r.body).unwrap())
		.collect()
}

fn ok_response(ingested: u64) -> ResponseTemplate {
	ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok", "ingested": ingested}))
}

#[tokio::test]
async fn single_event_is_posted_with_wire_shape() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/events"))
		.and(header("content-type", "application/json"))
		.respond_with(ok_response(1))
		.expect(1)
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key1", &server.uri(), 0);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track("app_open", Properties::new().insert("from", "host_app"));
	let report = next_report(&mut rx).await;
	assert_eq!(
		report.outcome,
		DeliveryOutcome::Delivered {
			status: 200,
			ingested: Some(1)
		}
	);

	let bodies = received_bodies(&server).await;
	assert_eq!(bodies.len(), 1);
	let body = &bodies[0];
	assert_eq!(body["api_key"], "key1");
	assert!(body["sent_at_ms"].is_i64());

	let events = body["events"].as_array().unwrap();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0]["event_name"], "app_open");
	assert_eq!(events[0]["session_id"], tracker.session_id());
	assert_eq!(events[0]["platform"], "rust");
	assert_eq!(events[0]["properties"]["from"], "host_app");
	assert!(events[0]["timestamp_ms"].is_i64());
}

#[tokio::test]
async fn threshold_batch_keeps_call_order() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/events"))
		.respond_with(ok_response(3))
		.expect(1)
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key", &format!("{}/", server.uri()), 3);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("a");
	tracker.track_event("b");
	assert_eq!(tracker.queue_len(), 2);
	tracker.track_event("c");
	assert_eq!(tracker.queue_len(), 0);

	let report = next_report(&mut rx).await;
	assert_eq!(report.event_count, 3);

	let bodies = received_bodies(&server).await;
	let names: Vec<_> = bodies[0]["events"]
		.as_array()
		.unwrap()
		.iter()
		.map(|e| e["event_name"].as_str().unwrap().to_string())
		.collect();
	assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn endpoint_base_path_is_kept() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/v1/events"))
		.respond_with(ok_response(1))
		.expect(1)
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key", &format!("{}/v1", server.uri()), 0);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("checkout_started");
	assert!(next_report(&mut rx).await.outcome.is_delivered());
}

#[tokio::test]
async fn server_error_is_reported_and_batch_dropped() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/events"))
		.respond_with(ResponseTemplate::new(400).set_body_string("No events provided"))
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key", &server.uri(), 0);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("will_fail");
	match next_report(&mut rx).await.outcome {
		DeliveryOutcome::Failed { error, retryable } => {
			assert!(error.contains("400"));
			assert!(error.contains("No events provided"));
			assert!(!retryable);
		}
		other => panic!("expected failure, got {other:?}"),
	}
	assert_eq!(tracker.queue_len(), 0);
	assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rate_limit_is_classified_retryable() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key", &server.uri(), 0);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("burst");
	match next_report(&mut rx).await.outcome {
		DeliveryOutcome::Failed { error, retryable } => {
			assert!(error.contains("30"));
			assert!(retryable);
		}
		other => panic!("expected failure, got {other:?}"),
	}
}

#[tokio::test]
async fn success_without_body_still_counts() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(204))
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init("key", &server.uri(), 0);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("ping");
	assert_eq!(
		next_report(&mut rx).await.outcome,
		DeliveryOutcome::Delivered {
			status: 204,
			ingested: None
		}
	);
}

#[tokio::test]
async fn malformed_endpoint_fails_at_first_flush() {
	let tracker = Tracker::new();
	assert!(tracker.init("key", "not a url", 0));
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("x");
	match next_report(&mut rx).await.outcome {
		DeliveryOutcome::Failed { error, retryable } => {
			assert!(error.contains("invalid endpoint"));
			assert!(!retryable);
		}
		other => panic!("expected failure, got {other:?}"),
	}
}

#[tokio::test]
async fn unreachable_host_does_not_disturb_caller() {
	let tracker = Tracker::new();
	tracker.init_with(
		TrackerConfig::builder()
			.api_key("key")
			.endpoint("http://127.0.0.1:1/")
			.request_timeout(Duration::from_secs(2))
			.build()
			.unwrap(),
	);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("offline");
	match next_report(&mut rx).await.outcome {
		DeliveryOutcome::Failed { retryable, .. } => assert!(retryable),
		other => panic!("expected failure, got {other:?}"),
	}
}

#[tokio::test]
async fn configured_context_reaches_the_wire() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ok_response(1))
		.mount(&server)
		.await;

	let tracker = Tracker::new();
	tracker.init_with(
		TrackerConfig::builder()
			.api_key("key")
			.endpoint(server.uri())
			.platform(Platform::Android)
			.app_version("1.0.2")
			.locale("en-US")
			.timezone("America/New_York")
			.build()
			.unwrap(),
	);
	let mut rx = tracker.subscribe().unwrap();

	tracker.track_event("screen_view");
	next_report(&mut rx).await;

	let event = &received_bodies(&server).await[0]["events"][0];
	assert_eq!(event["platform"], "android");
	assert_eq!(event["app_version"], "1.0.2");
	assert_eq!(event["locale"], "en-US");
	assert_eq!(event["timezone"], "America/New_York");
	assert_eq!(event["sdk_version"], beacon_analytics::SDK_VERSION);
	assert!(event["event_id"].is_string());
}

#[tokio::test]
async fn transport_follows_endpoint_changes() {
	let first = MockServer::start().await;
	let second = MockServer::start().await;
	for server in [&first, &second] {
		Mock::given(method("POST"))
			.and(path("/events"))
			.respond_with(ok_response(1))
			.expect(1)
			.mount(server)
			.await;
	}

	let transport = HttpTransport::new();
	let batch = |name: &str| {
		let record = beacon_analytics::EventRecord::new(
			name,
			beacon_analytics::SessionId::generate(),
			Platform::Rust,
			Properties::new(),
		)
		.unwrap();
		beacon_analytics::EventBatch::from_records(
			&beacon_analytics::ApiKey::new("key"),
			&[record],
			&Default::default(),
		)
	};

	let first_endpoint = format!("{}/", first.uri());
	let second_endpoint = format!("{}/", second.uri());

	transport.send(&first_endpoint, &batch("one")).await.unwrap();
	assert_eq!(transport.current_endpoint(), Some(first_endpoint));
	transport.send(&second_endpoint, &batch("two")).await.unwrap();
	assert_eq!(transport.current_endpoint(), Some(second_endpoint));
}
