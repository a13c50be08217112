// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Cursor continuation loop.
//!
//! The first request runs on the caller; its failure is the only one that
//! prevents a [`Cursor`] from being created. Every later page is fetched by a
//! spawned producer that follows `hasMore`/`id` until the server reports
//! exhaustion or an error.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, instrument, trace, warn};

use super::{
	Cursor,
	channel::{CancellationToken, StreamItem, channel},
};
use crate::{
	config::Credentials,
	envelope::Envelope,
	error::Result,
	transport::{Method, Request, Transport},
};

/// Issue `request` and hand back a cursor over all of its pages.
#[instrument(name = "client::cursor::start", level = "debug", skip_all, fields(method = %request.method, path = %request.path))]
pub(crate) async fn start<T: Transport>(transport: Arc<T>, request: Request, capacity: usize) -> Result<Cursor> {
	let path = request.path.clone();
	let credentials = request.credentials.clone();

	let response = transport.call(request).await?;
	let first = Envelope::from_response(response)?;

	let (sender, receiver) = channel(capacity);
	let cancel = CancellationToken::new();

	let producer = Producer {
		transport,
		path,
		credentials,
		sender,
		cancel: cancel.clone(),
	};
	tokio::spawn(producer.run(first));

	Ok(Cursor::new(receiver, cancel))
}

struct Producer<T> {
	transport: Arc<T>,
	path: String,
	credentials: Option<Credentials>,
	sender: mpsc::Sender<StreamItem>,
	cancel: CancellationToken,
}

impl<T: Transport> Producer<T> {
	async fn run(self, first: Envelope) {
		let mut envelope = first;
		let mut pages = 0usize;

		loop {
			let next = match envelope.into_page() {
				Ok((page, next)) => {
					pages += 1;
					trace!(pages, len = page.get().len(), "cursor page");
					let item = StreamItem::Page {
						page,
						last: next.is_none(),
					};
					if !self.emit(item).await {
						debug!(pages, "cursor consumer went away");
						return;
					}
					next
				}
				Err(err) => {
					debug!(pages, error = %err, "cursor failed");
					self.emit(StreamItem::Error(err)).await;
					return;
				}
			};

			let Some(id) = next else {
				trace!(pages, "cursor exhausted");
				return;
			};

			if self.cancel.is_cancelled() || self.sender.is_closed() {
				debug!(pages, cursor = %id, "cursor cancelled");
				return;
			}

			envelope = match self.fetch(&id).await {
				Ok(envelope) => envelope,
				Err(err) => {
					warn!(pages, cursor = %id, error = %err, "cursor continuation failed");
					self.emit(StreamItem::Error(err)).await;
					return;
				}
			};
		}
	}

	async fn fetch(&self, id: &str) -> Result<Envelope> {
		let request = Request {
			method: Method::Put,
			path: format!("{}/{}", self.path, id),
			body: Vec::new(),
			credentials: self.credentials.clone(),
		};
		let response = self.transport.call(request).await?;
		Envelope::from_response(response)
	}

	/// Returns false once the consumer has dropped its end.
	async fn emit(&self, item: StreamItem) -> bool {
		self.sender.send(item).await.is_ok()
	}
}
