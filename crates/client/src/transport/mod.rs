// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! The request/response primitive the cursor engine is built on.

mod http;

use std::fmt;

pub use http::HttpTransport;

use crate::{config::Credentials, error::TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One call to the server. `path` is already database scoped.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub path: String,
	pub body: Vec<u8>,
	pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone)]
pub struct Response {
	pub status: u16,
	pub body: Vec<u8>,
}

impl Response {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Performs a single HTTP exchange.
///
/// Implementations must not interpret the body; a non-2xx status is returned
/// as a normal [`Response`] and classified by the caller.
pub trait Transport: Send + Sync + 'static {
	fn call(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send;
}
