// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Error types surfaced by the client.
//!
//! Failures before the first request leave the call with an `Err` and no
//! cursor. Failures after streaming began arrive as the last item of a
//! [`Cursor`](crate::Cursor); the blocking drain collapses them into a single
//! `Err` and drops any partial data.

use std::io;

/// Failure of the transport primitive itself.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("unexpected status {status}: {body}")]
	Status {
		status: u16,
		body: String,
	},

	#[error("invalid endpoint: {0}")]
	InvalidEndpoint(String),

	#[error("transport unavailable: {0}")]
	Unavailable(String),
}

impl TransportError {
	/// HTTP status carried by the failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			TransportError::Status {
				status,
				..
			} => Some(*status),
			TransportError::Request(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Transport(#[from] TransportError),

	#[error("malformed response envelope: {0}")]
	Decode(#[source] serde_json::Error),

	#[error("failed to serialize request: {0}")]
	Marshal(#[source] serde_json::Error),

	/// The server answered with `error: true`. Displays the server message verbatim.
	#[error("{message}")]
	Database {
		message: String,
		code: Option<u16>,
		error_num: Option<i64>,
	},

	#[error("invalid transaction: {0}")]
	InvalidTransaction(String),

	#[error("failed to start runtime: {0}")]
	Runtime(#[source] io::Error),
}

impl Error {
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Transport(_))
	}

	pub fn is_database(&self) -> bool {
		matches!(self, Error::Database { .. })
	}

	/// Server message of a database error.
	pub fn database_message(&self) -> Option<&str> {
		match self {
			Error::Database {
				message,
				..
			} => Some(message),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
