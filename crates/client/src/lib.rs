// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Client for document databases that page query results through server-side
//! cursors.
//!
//! A request is answered with an envelope carrying one page of results and,
//! while `hasMore` is set, a cursor id. The client follows that id with
//! `PUT <path>/<id>` until the server reports exhaustion or an error, and
//! delivers the pages either merged into one JSON array
//! ([`Connection::run`]) or one by one through a [`Cursor`]
//! ([`Connection::run_async`]).
//!
//! # Example
//!
//! ```no_run
//! use docdb_client::{Connection, ConnectionConfig, Query};
//!
//! # async fn example() -> docdb_client::Result<()> {
//! let connection = Connection::connect(ConnectionConfig::new("http://localhost:8529", "shop"))?;
//!
//! let mut cursor = connection.run_async(&Query::new("FOR o IN orders RETURN o").batch_size(100)).await?;
//! while let Some(page) = cursor.next().await {
//! 	let page = page?;
//! 	println!("{}", page.get());
//! }
//! # Ok(())
//! # }
//! ```

mod blocking;
mod config;
mod connection;
mod cursor;
mod envelope;
mod error;
mod page;
mod query;
mod runnable;
mod transaction;
pub mod transport;

pub use blocking::{BlockingConnection, BlockingCursor};
pub use config::{ConnectionConfig, Credentials, LogOptions};
pub use connection::Connection;
pub use cursor::Cursor;
pub use envelope::Envelope;
pub use error::{Error, Result, TransportError};
pub use page::Page;
pub use query::Query;
pub use runnable::Runnable;
pub use transaction::Transaction;
pub use transport::{HttpTransport, Method, Request, Response, Transport};
