// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{fmt, time::Duration};

const DEFAULT_ENDPOINT: &str = "http://localhost:8529";
const DEFAULT_DATABASE: &str = "_system";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CHANNEL_CAPACITY: usize = 4;

/// User and password sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	pub user: String,
	pub password: String,
}

impl Credentials {
	pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			user: user.into(),
			password: password.into(),
		}
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials").field("user", &self.user).field("password", &"***").finish()
	}
}

/// Controls what a connection writes to its `tracing` spans.
///
/// Query bodies and results can be large or sensitive, so each is opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
	/// Log every run with its description and elapsed time.
	pub enabled: bool,
	/// Include the serialized request body.
	pub query: bool,
	/// Include the aggregated result.
	pub result: bool,
}

impl LogOptions {
	pub fn new(enabled: bool, query: bool, result: bool) -> Self {
		Self {
			enabled,
			query,
			result,
		}
	}
}

/// Connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
	/// Server root, e.g. `http://arangodb:8000`.
	pub endpoint: String,
	/// Database every request path is scoped to.
	pub database: String,
	pub credentials: Option<Credentials>,
	/// Per-request timeout applied by the HTTP transport.
	pub timeout: Duration,
	/// Pages buffered between the cursor producer and its consumer.
	pub channel_capacity: usize,
	pub log: LogOptions,
}

impl ConnectionConfig {
	pub fn new(endpoint: impl Into<String>, database: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			database: database.into(),
			..Default::default()
		}
	}

	pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
		self.credentials = Some(Credentials::new(user, password));
		self
	}

	/// Set timeout for requests
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Values below one are raised to one; the channel always applies backpressure.
	pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
		self.channel_capacity = capacity.max(1);
		self
	}

	pub fn with_log(mut self, log: LogOptions) -> Self {
		self.log = log;
		self
	}

	/// Prefix a server path with the database scope.
	pub fn scoped_path(&self, path: &str) -> String {
		format!("/_db/{}{}", self.database, path)
	}
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			database: DEFAULT_DATABASE.to_string(),
			credentials: None,
			timeout: DEFAULT_TIMEOUT,
			channel_capacity: DEFAULT_CHANNEL_CAPACITY,
			log: LogOptions::default(),
		}
	}
}
