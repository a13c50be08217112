// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! In-memory [`Transport`] for exercising `docdb-client` without a server.
//!
//! Responders are registered per method and database-scoped path. Every call
//! is recorded, so tests can assert how many requests were issued and where
//! they were addressed. A call without a matching responder fails with
//! [`TransportError::Unavailable`].

use std::{collections::HashMap, future, sync::Arc};

use docdb_client::{Method, Request, Response, Transport, TransportError};
use parking_lot::Mutex;

type Responder = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

#[derive(Default)]
struct State {
	responders: HashMap<(Method, String), Responder>,
	calls: Vec<Request>,
}

/// Cloning shares the registered responders and the call log.
#[derive(Clone, Default)]
pub struct MockTransport {
	state: Arc<Mutex<State>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answer `method path` with a fixed status and body. Replaces any earlier responder.
	pub fn register(&self, method: Method, path: impl Into<String>, status: u16, body: impl Into<String>) {
		let body = body.into();
		self.register_fn(method, path, move |_| Response::new(status, body.clone()));
	}

	/// Answer `method path` by calling `responder` with the incoming request.
	pub fn register_fn<F>(&self, method: Method, path: impl Into<String>, responder: F)
	where
		F: Fn(&Request) -> Response + Send + Sync + 'static,
	{
		self.state.lock().responders.insert((method, path.into()), Arc::new(responder));
	}

	/// Forget all responders and recorded calls.
	pub fn reset(&self) {
		let mut state = self.state.lock();
		state.responders.clear();
		state.calls.clear();
	}

	pub fn calls(&self) -> Vec<Request> {
		self.state.lock().calls.clone()
	}

	/// `(method, path)` of every recorded call, in order.
	pub fn call_targets(&self) -> Vec<(Method, String)> {
		self.state.lock().calls.iter().map(|r| (r.method, r.path.clone())).collect()
	}

	pub fn call_count(&self) -> usize {
		self.state.lock().calls.len()
	}

	fn respond(&self, request: Request) -> Result<Response, TransportError> {
		let responder = {
			let mut state = self.state.lock();
			let responder = state.responders.get(&(request.method, request.path.clone())).cloned();
			state.calls.push(request.clone());
			responder
		};
		match responder {
			Some(responder) => Ok(responder(&request)),
			None => Err(TransportError::Unavailable(format!(
				"no responder for {} {}",
				request.method, request.path
			))),
		}
	}
}

impl Transport for MockTransport {
	fn call(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send {
		future::ready(self.respond(request))
	}
}
