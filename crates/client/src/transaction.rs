// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Server-side scripted transactions.
//!
//! Sub-queries are chained into a single JavaScript action. A query template
//! can refer to the result of any query declared before it with
//! `{{.name}}`; the placeholder is replaced by the serialized documents of
//! that earlier result.

use serde::Serialize;

use crate::{
	connection::Connection,
	error::{Error, Result},
	runnable::Runnable,
	transport::Transport,
};

pub(crate) const TRANSACTION_PATH: &str = "/_api/transaction";

#[derive(Debug, Clone, PartialEq, Eq)]
struct NamedQuery {
	name: String,
	template: String,
}

#[derive(Debug, Clone, Default)]
pub struct Transaction {
	read: Vec<String>,
	write: Vec<String>,
	queries: Vec<NamedQuery>,
	returning: Option<String>,
}

#[derive(Serialize)]
struct Collections<'a> {
	read: &'a [String],
	write: &'a [String],
}

#[derive(Serialize)]
struct Body<'a> {
	collections: Collections<'a>,
	action: String,
}

impl Transaction {
	pub fn new<R, W>(read: R, write: W) -> Self
	where
		R: IntoIterator,
		R::Item: Into<String>,
		W: IntoIterator,
		W::Item: Into<String>,
	{
		Self {
			read: read.into_iter().map(Into::into).collect(),
			write: write.into_iter().map(Into::into).collect(),
			..Default::default()
		}
	}

	/// Append a sub-query whose result is bound to `name` in the script.
	pub fn add_query(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
		self.queries.push(NamedQuery {
			name: name.into(),
			template: template.into(),
		});
		self
	}

	/// Variable returned by the script.
	pub fn returning(mut self, name: impl Into<String>) -> Self {
		self.returning = Some(name.into());
		self
	}

	fn validate(&self) -> Result<()> {
		if self.read.is_empty() && self.write.is_empty() {
			return Err(Error::InvalidTransaction("no read or write collections declared".to_string()));
		}
		Ok(())
	}

	/// The JavaScript action sent to the server.
	pub fn script(&self) -> String {
		let mut script = String::from("function () {var db = require('internal').db; ");
		for (i, query) in self.queries.iter().enumerate() {
			let text = render(&query.template, &self.queries[..i]);
			script.push_str(&format!("var {} = db._query('{}'); ", query.name, text));
		}
		if let Some(name) = &self.returning {
			script.push_str(&format!("return {};", name));
		}
		script.push('}');
		script
	}

	pub async fn run<T: Transport>(&self, connection: &Connection<T>) -> Result<Vec<u8>> {
		connection.run(self).await
	}
}

/// Replace `{{.name}}` for every query declared before the one being rendered.
fn render(template: &str, prior: &[NamedQuery]) -> String {
	prior.iter().fold(template.to_string(), |text, query| {
		let placeholder = format!("{{{{.{}}}}}", query.name);
		let expansion = format!("' + JSON.stringify({}._documents) + '", query.name);
		text.replace(&placeholder, &expansion)
	})
}

impl Runnable for Transaction {
	fn description(&self) -> &str {
		"TRANSACTION"
	}

	fn path(&self) -> &str {
		TRANSACTION_PATH
	}

	fn body(&self) -> Result<Vec<u8>> {
		self.validate()?;
		let body = Body {
			collections: Collections {
				read: &self.read,
				write: &self.write,
			},
			action: self.script(),
		};
		serde_json::to_vec(&body).map_err(Error::Marshal)
	}
}
