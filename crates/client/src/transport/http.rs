// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use reqwest::{Url, header::CONTENT_TYPE};
use tracing::trace;

use super::{Method, Request, Response, Transport};
use crate::{config::ConnectionConfig, error::TransportError};

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	endpoint: String,
}

impl HttpTransport {
	/// Create a transport for the server root `endpoint` (e.g. "http://localhost:8529")
	pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
		let endpoint = endpoint.trim_end_matches('/');
		if endpoint.is_empty() {
			return Err(TransportError::InvalidEndpoint("endpoint is empty".to_string()));
		}
		Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

		let client = reqwest::Client::builder().timeout(timeout).build()?;

		Ok(Self {
			client,
			endpoint: endpoint.to_string(),
		})
	}

	pub fn from_config(config: &ConnectionConfig) -> Result<Self, TransportError> {
		Self::new(&config.endpoint, config.timeout)
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

fn to_reqwest(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Patch => reqwest::Method::PATCH,
		Method::Delete => reqwest::Method::DELETE,
	}
}

impl Transport for HttpTransport {
	async fn call(&self, request: Request) -> Result<Response, TransportError> {
		let url = format!("{}{}", self.endpoint, request.path);
		trace!(method = %request.method, %url, "http request");

		let mut builder = self
			.client
			.request(to_reqwest(request.method), url)
			.header(CONTENT_TYPE, "application/json")
			.body(request.body);

		if let Some(credentials) = &request.credentials {
			builder = builder.basic_auth(&credentials.user, Some(&credentials.password));
		}

		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();
		trace!(status, len = body.len(), "http response");

		Ok(Response {
			status,
			body,
		})
	}
}
