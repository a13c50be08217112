// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{error::Result, transport::Method};

/// Anything that can be submitted to a [`Connection`](crate::Connection).
///
/// `body` is built before any request is issued, so validation and
/// serialization failures never reach the network.
pub trait Runnable {
	/// Short label used in logs.
	fn description(&self) -> &str;

	fn method(&self) -> Method {
		Method::Post
	}

	/// Path relative to the database scope.
	fn path(&self) -> &str;

	fn body(&self) -> Result<Vec<u8>>;
}
