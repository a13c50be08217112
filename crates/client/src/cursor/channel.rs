// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc;

use crate::{error::Error, page::Page};

/// A value travelling from the cursor producer to its consumer.
///
/// At most one `Error` is ever sent and nothing follows it. The final page of
/// an exhausted cursor carries `last`, so the consumer knows it is done before
/// the sender is dropped.
#[derive(Debug)]
pub(crate) enum StreamItem {
	Page {
		page: Page,
		last: bool,
	},
	Error(Error),
}

impl StreamItem {
	/// Whether nothing can follow this item.
	pub(crate) fn is_terminal(&self) -> bool {
		match self {
			StreamItem::Page {
				last,
				..
			} => *last,
			StreamItem::Error(_) => true,
		}
	}
}

/// A cancellation token for stopping a cursor producer.
///
/// This is a simple atomic boolean shared by the producer and the consumer.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	pub(crate) fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

/// Bounded so a slow consumer blocks the producer instead of losing pages.
pub(crate) fn channel(capacity: usize) -> (mpsc::Sender<StreamItem>, mpsc::Receiver<StreamItem>) {
	mpsc::channel(capacity.max(1))
}
