// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Instant};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use crate::{
	config::{ConnectionConfig, Credentials},
	cursor::{Cursor, engine},
	error::{Error, Result},
	runnable::Runnable,
	transport::{HttpTransport, Method, Request, Transport},
};

/// Entry point for running queries and transactions against one database.
///
/// # Example
/// ```no_run
/// use docdb_client::{Connection, ConnectionConfig, Query};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// 	let config = ConnectionConfig::new("http://localhost:8529", "shop").with_credentials("root", "secret");
/// 	let connection = Connection::connect(config)?;
///
/// 	let customers = connection.run(&Query::new("FOR c IN customer RETURN c")).await?;
/// 	println!("{}", String::from_utf8_lossy(&customers));
/// 	Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Connection<T: Transport = HttpTransport> {
	transport: Arc<T>,
	config: ConnectionConfig,
}

impl Connection<HttpTransport> {
	/// Create a connection speaking HTTP to `config.endpoint`.
	pub fn connect(config: ConnectionConfig) -> Result<Self> {
		let transport = HttpTransport::from_config(&config)?;
		Ok(Self::with_transport(config, transport))
	}
}

impl<T: Transport> Connection<T> {
	pub fn with_transport(config: ConnectionConfig, transport: T) -> Self {
		Self {
			transport: Arc::new(transport),
			config,
		}
	}

	pub fn config(&self) -> &ConnectionConfig {
		&self.config
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Scope subsequent requests to another database.
	pub fn switch_database(&mut self, database: impl Into<String>) -> &mut Self {
		self.config.database = database.into();
		self
	}

	/// Authenticate subsequent requests as another user.
	pub fn switch_user(&mut self, user: impl Into<String>, password: impl Into<String>) -> &mut Self {
		self.config.credentials = Some(Credentials::new(user, password));
		self
	}

	/// Run to completion and return every page merged into one JSON array.
	///
	/// Any error, including one reported after some pages were fetched,
	/// fails the whole call.
	#[instrument(name = "client::connection::run", level = "debug", skip_all, fields(description = runnable.description()))]
	pub async fn run<R: Runnable + ?Sized>(&self, runnable: &R) -> Result<Vec<u8>> {
		let body = runnable.body()?;
		self.execute(runnable.description(), runnable.method(), runnable.path(), body).await
	}

	/// Run and decode the merged result.
	pub async fn run_as<D, R>(&self, runnable: &R) -> Result<D>
	where
		D: DeserializeOwned,
		R: Runnable + ?Sized,
	{
		let bytes = self.run(runnable).await?;
		serde_json::from_slice(&bytes).map_err(Error::Decode)
	}

	/// Issue the first request and return a cursor over the pages as they arrive.
	#[instrument(name = "client::connection::run_async", level = "debug", skip_all, fields(description = runnable.description()))]
	pub async fn run_async<R: Runnable + ?Sized>(&self, runnable: &R) -> Result<Cursor> {
		let body = runnable.body()?;
		self.send_raw(runnable.description(), runnable.method(), runnable.path(), body).await
	}

	/// Serialize `payload` and run it against an arbitrary path.
	pub async fn send<P: Serialize + ?Sized>(
		&self,
		description: &str,
		method: Method,
		path: &str,
		payload: &P,
	) -> Result<Vec<u8>> {
		let body = serde_json::to_vec(payload).map_err(Error::Marshal)?;
		self.execute(description, method, path, body).await
	}

	/// Send pre-serialized bytes and return a cursor over the response pages.
	pub async fn send_raw(&self, description: &str, method: Method, path: &str, body: Vec<u8>) -> Result<Cursor> {
		self.log_request(description, path, &body);
		let request = self.request(method, path, body);
		engine::start(self.transport.clone(), request, self.config.channel_capacity).await
	}

	async fn execute(&self, description: &str, method: Method, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
		let started = Instant::now();
		let cursor = self.send_raw(description, method, path, body).await?;
		let result = cursor.collect().await;

		let log = self.config.log;
		if log.enabled {
			match &result {
				Ok(bytes) => {
					info!(description, elapsed = ?started.elapsed(), len = bytes.len(), "run completed");
					if log.result {
						debug!(description, result = %String::from_utf8_lossy(bytes), "run result");
					}
				}
				Err(err) => info!(description, elapsed = ?started.elapsed(), error = %err, "run failed"),
			}
		}
		result
	}

	fn log_request(&self, description: &str, path: &str, body: &[u8]) {
		let log = self.config.log;
		if !log.enabled {
			return;
		}
		info!(description, database = %self.config.database, path, "run started");
		if log.query {
			info!(description, body = %String::from_utf8_lossy(body), "run request");
		}
	}

	fn request(&self, method: Method, path: &str, body: Vec<u8>) -> Request {
		Request {
			method,
			path: self.config.scoped_path(path),
			body,
			credentials: self.config.credentials.clone(),
		}
	}
}
