// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Demo: a scripted shopping session reported through the analytics SDK.
//!
//! Run with:
//!   BEACON_API_KEY=pk_test_123 cargo run --example shopflow -p beacon-analytics
//!
//! Optional: `BEACON_ENDPOINT` (default `http://localhost:8000/`),
//! `BEACON_FLUSH_THRESHOLD` (default `5`), `RUST_LOG` (default `debug`).

use std::sync::Arc;
use std::time::Duration;

use beacon_analytics::{Platform, Properties, Tracker, TrackerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
		)
		.init();

	let api_key = std::env::var("BEACON_API_KEY")?;
	let endpoint =
		std::env::var("BEACON_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000/".to_string());
	let flush_threshold: usize = match std::env::var("BEACON_FLUSH_THRESHOLD") {
		Ok(v) => v.parse()?,
		Err(_) => 5,
	};

	let config = TrackerConfig::builder()
		.api_key(api_key)
		.endpoint(endpoint)
		.flush_threshold(flush_threshold)
		.platform(Platform::Other("shopflow-demo".to_string()))
		.app_version("1.0.2")
		.build()?;

	let tracker = Arc::new(Tracker::new());
	tracker.init_with(config);
	let mut reports = tracker
		.subscribe()
		.ok_or("tracker has no delivery runtime")?;

	println!("Session: {}", tracker.session_id());

	tracker.track("app_open", Properties::new().insert("launch_source", "direct"));
	tracker.track("home_view", Properties::new().insert("screen", "home"));
	tracker.track(
		"product_view",
		Properties::new()
			.insert("product_id", "sku-42")
			.insert("price", 19.99),
	);
	tracker.track(
		"add_to_cart",
		Properties::new()
			.insert("product_id", "sku-42")
			.insert("quantity", 1),
	);
	tracker.track(
		"cart_view",
		Properties::new().insert("item_count", 1).insert("cart_total", 19.99),
	);
	tracker.track("checkout_start", Properties::new().insert("cart_total", 19.99));

	// The app goes to the background: ship what is left and start over.
	tracker.flush();
	tracker.start_new_session();
	println!("Session: {}", tracker.session_id());

	tracker.track("app_open", Properties::new().insert("launch_source", "resume"));
	tracker.flush();

	while let Ok(Ok(report)) = tokio::time::timeout(Duration::from_secs(3), reports.recv()).await {
		println!(
			"batch {} ({} events): {:?}",
			report.batch_id, report.event_count, report.outcome
		);
	}

	Ok(())
}
