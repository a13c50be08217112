// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use serde::{Serialize, de::DeserializeOwned};
use tokio::runtime::{Builder, Runtime};

use crate::{
	config::ConnectionConfig,
	connection::Connection,
	cursor::Cursor,
	error::{Error, Result},
	page::Page,
	runnable::Runnable,
	transport::{HttpTransport, Method, Transport},
};

/// A [`Connection`] that waits for responses synchronously.
///
/// Owns a small runtime that drives the cursor producers, so it must not be
/// used from inside another async runtime.
pub struct BlockingConnection<T: Transport = HttpTransport> {
	runtime: Runtime,
	inner: Connection<T>,
}

impl BlockingConnection<HttpTransport> {
	pub fn connect(config: ConnectionConfig) -> Result<Self> {
		Self::from_connection(Connection::connect(config)?)
	}
}

impl<T: Transport> BlockingConnection<T> {
	pub fn from_connection(inner: Connection<T>) -> Result<Self> {
		let runtime = Builder::new_multi_thread()
			.worker_threads(1)
			.thread_name("docdb-cursor")
			.enable_all()
			.build()
			.map_err(Error::Runtime)?;

		Ok(Self {
			runtime,
			inner,
		})
	}

	pub fn connection(&self) -> &Connection<T> {
		&self.inner
	}

	pub fn connection_mut(&mut self) -> &mut Connection<T> {
		&mut self.inner
	}

	pub fn run<R: Runnable + ?Sized>(&self, runnable: &R) -> Result<Vec<u8>> {
		self.runtime.block_on(self.inner.run(runnable))
	}

	pub fn run_as<D, R>(&self, runnable: &R) -> Result<D>
	where
		D: DeserializeOwned,
		R: Runnable + ?Sized,
	{
		self.runtime.block_on(self.inner.run_as(runnable))
	}

	pub fn send<P: Serialize + ?Sized>(
		&self,
		description: &str,
		method: Method,
		path: &str,
		payload: &P,
	) -> Result<Vec<u8>> {
		self.runtime.block_on(self.inner.send(description, method, path, payload))
	}

	/// Issue the first request and iterate over pages as they arrive.
	pub fn run_async<R: Runnable + ?Sized>(&self, runnable: &R) -> Result<BlockingCursor<'_>> {
		let cursor = self.runtime.block_on(self.inner.run_async(runnable))?;
		Ok(BlockingCursor {
			cursor,
			_runtime: PhantomData,
		})
	}
}

/// Iterator over the pages of a cursor, borrowing the runtime that feeds it.
pub struct BlockingCursor<'a> {
	cursor: Cursor,
	_runtime: PhantomData<&'a Runtime>,
}

impl BlockingCursor<'_> {
	pub fn has_more(&self) -> bool {
		self.cursor.has_more()
	}

	pub fn cancel(&mut self) {
		self.cursor.cancel();
	}

	pub fn collect_all(self) -> Result<Vec<u8>> {
		self.cursor.blocking_collect()
	}
}

impl Iterator for BlockingCursor<'_> {
	type Item = Result<Page>;

	fn next(&mut self) -> Option<Self::Item> {
		self.cursor.blocking_next()
	}
}
