// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use docdb_client::{Connection, ConnectionConfig, LogOptions};
use docdb_client_testing::MockTransport;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub const CURSOR_PATH: &str = "/_db/dbName/_api/cursor";
#[allow(dead_code)]
pub const TRANSACTION_PATH: &str = "/_db/dbName/_api/transaction";

/// Install a test subscriber controlled by `RUST_LOG`.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

#[allow(dead_code)]
pub fn config() -> ConnectionConfig {
	ConnectionConfig::new("http://arangodb:8000", "dbName")
		.with_credentials("foo", "bar")
		.with_log(LogOptions::new(true, true, true))
}

/// A connection backed by a fresh mock; the returned mock shares its state.
#[allow(dead_code)]
pub fn connect() -> (Connection<MockTransport>, MockTransport) {
	init_tracing();
	let mock = MockTransport::new();
	(Connection::with_transport(config(), mock.clone()), mock)
}

#[allow(dead_code)]
pub fn text(bytes: Vec<u8>) -> String {
	String::from_utf8(bytes).unwrap()
}
