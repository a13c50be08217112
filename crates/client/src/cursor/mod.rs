// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Paginated result delivery.
//!
//! A [`Cursor`] is the consumer end of one cursor lifecycle. Pull pages one at
//! a time with [`Cursor::next`], or drain everything into a single JSON array
//! with [`Cursor::collect`].

mod aggregate;
mod channel;
pub(crate) mod engine;

use futures_util::{Stream, stream};
use tokio::sync::mpsc;
use tracing::instrument;

use self::{
	aggregate::Aggregate,
	channel::{CancellationToken, StreamItem},
};
use crate::{error::Result, page::Page};

/// Consumer handle over the pages of one server cursor.
///
/// Errors arrive in-band as the last item. Dropping the handle stops the
/// background producer before its next continuation request.
#[derive(Debug)]
pub struct Cursor {
	receiver: mpsc::Receiver<StreamItem>,
	cancel: CancellationToken,
	finished: bool,
}

impl Cursor {
	pub(crate) fn new(receiver: mpsc::Receiver<StreamItem>, cancel: CancellationToken) -> Self {
		Self {
			receiver,
			cancel,
			finished: false,
		}
	}

	/// Whether at least one more item can still be pulled right now: either
	/// one is buffered or the producer has not finished.
	///
	/// Turns false as soon as the final page or the error has been pulled,
	/// even if the producer has not yet dropped its end of the channel.
	pub fn has_more(&self) -> bool {
		!self.finished && !(self.receiver.is_empty() && self.receiver.is_closed())
	}

	/// Next page or the terminal error; `None` once the cursor is drained.
	pub async fn next(&mut self) -> Option<Result<Page>> {
		let item = self.receiver.recv().await;
		self.accept(item)
	}

	/// Like [`next`](Self::next) but parks the current thread.
	///
	/// Must not be called from within an async context.
	pub fn blocking_next(&mut self) -> Option<Result<Page>> {
		let item = self.receiver.blocking_recv();
		self.accept(item)
	}

	fn accept(&mut self, item: Option<StreamItem>) -> Option<Result<Page>> {
		match item {
			Some(item) => {
				self.finished |= item.is_terminal();
				Some(into_result(item))
			}
			None => {
				self.finished = true;
				None
			}
		}
	}

	/// Stop fetching further pages. Items already buffered can still be pulled.
	pub fn cancel(&mut self) {
		self.cancel.cancel();
		self.receiver.close();
	}

	/// Drain every page into one JSON array.
	///
	/// A terminal error discards whatever was already received.
	#[instrument(name = "client::cursor::collect", level = "debug", skip_all)]
	pub async fn collect(mut self) -> Result<Vec<u8>> {
		let mut aggregate = Aggregate::default();
		while let Some(item) = self.next().await {
			aggregate.push(item?)?;
		}
		Ok(aggregate.finish())
	}

	/// Blocking counterpart of [`collect`](Self::collect).
	pub fn blocking_collect(mut self) -> Result<Vec<u8>> {
		let mut aggregate = Aggregate::default();
		while let Some(item) = self.blocking_next() {
			aggregate.push(item?)?;
		}
		Ok(aggregate.finish())
	}

	pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + Send {
		stream::unfold(self, |mut cursor| async move { cursor.next().await.map(|item| (item, cursor)) })
	}
}

impl Drop for Cursor {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}

fn into_result(item: StreamItem) -> Result<Page> {
	match item {
		StreamItem::Page {
			page,
			..
		} => Ok(page),
		StreamItem::Error(err) => Err(err),
	}
}
