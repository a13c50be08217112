// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::{
	error::{Error, Result},
	runnable::Runnable,
};

pub(crate) const CURSOR_PATH: &str = "/_api/cursor";

/// A query submitted to the cursor API.
///
/// Serializes to `{"query": ..., "bindVars": ..., "cache": ..., "batchSize": ...}`
/// with unset options omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Query {
	query: String,
	#[serde(rename = "bindVars", skip_serializing_if = "HashMap::is_empty")]
	bind_vars: HashMap<String, Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	cache: Option<bool>,
	#[serde(rename = "batchSize", skip_serializing_if = "Option::is_none")]
	batch_size: Option<u32>,
}

impl Query {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			..Default::default()
		}
	}

	/// Bind `@name` to `value`.
	pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.bind_vars.insert(name.into(), value.into());
		self
	}

	/// Bind any serializable value; fails with [`Error::Marshal`] if it cannot be represented as JSON.
	pub fn try_bind<V: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &V) -> Result<Self> {
		let value = serde_json::to_value(value).map_err(Error::Marshal)?;
		self.bind_vars.insert(name.into(), value);
		Ok(self)
	}

	pub fn cache(mut self, enable: bool) -> Self {
		self.cache = Some(enable);
		self
	}

	/// Maximum number of results per page.
	pub fn batch_size(mut self, size: u32) -> Self {
		self.batch_size = Some(size);
		self
	}

	pub fn text(&self) -> &str {
		&self.query
	}

	pub fn bind_vars(&self) -> &HashMap<String, Value> {
		&self.bind_vars
	}
}

impl Runnable for Query {
	fn description(&self) -> &str {
		"QUERY"
	}

	fn path(&self) -> &str {
		CURSOR_PATH
	}

	fn body(&self) -> Result<Vec<u8>> {
		serde_json::to_vec(self).map_err(Error::Marshal)
	}
}
