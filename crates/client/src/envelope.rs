// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Decoding of the server's response envelope.
//!
//! Success and failure share one shape distinguished by `error`:
//!
//! ```json
//! {"error": false, "result": [...], "hasMore": true, "id": "1000"}
//! {"error": true, "errorMessage": "collection not found", "code": 404, "errorNum": 1203}
//! ```

use serde::{Deserialize, de::Error as _};
use serde_json::value::RawValue;

use crate::{
	error::{Error, Result, TransportError},
	page::Page,
	transport::Response,
};

#[derive(Debug, Deserialize)]
pub struct Envelope {
	#[serde(default)]
	pub error: bool,
	#[serde(default, rename = "errorMessage")]
	pub error_message: String,
	#[serde(default)]
	pub code: Option<u16>,
	#[serde(default, rename = "errorNum")]
	pub error_num: Option<i64>,
	/// Missing or `null` reads as an empty page.
	#[serde(default)]
	pub result: Option<Box<RawValue>>,
	#[serde(default, rename = "hasMore")]
	pub has_more: bool,
	#[serde(default)]
	pub id: Option<String>,
}

impl Envelope {
	/// Parse raw response bytes.
	pub fn decode(bytes: &[u8]) -> Result<Self> {
		let envelope: Envelope = serde_json::from_slice(bytes).map_err(Error::Decode)?;
		if envelope.error || !envelope.has_more {
			return Ok(envelope);
		}
		match envelope.id.as_deref() {
			None => return Err(Error::Decode(serde_json::Error::custom("envelope has more pages but no cursor id"))),
			Some(id) if !is_path_segment(id) => {
				return Err(Error::Decode(serde_json::Error::custom(format!(
					"cursor id {id:?} is not a path segment"
				))));
			}
			Some(_) => {}
		}
		Ok(envelope)
	}

	/// Classify a transport response.
	///
	/// A non-2xx status is a transport failure unless its body is an error
	/// envelope, in which case the envelope is authoritative.
	pub fn from_response(response: Response) -> Result<Self> {
		if response.is_success() {
			return Self::decode(&response.body);
		}
		match Self::decode(&response.body) {
			Ok(envelope) if envelope.error => Ok(envelope),
			_ => Err(TransportError::Status {
				status: response.status,
				body: String::from_utf8_lossy(&response.body).into_owned(),
			}
			.into()),
		}
	}

	/// Cursor id to continue with. An error envelope never continues.
	pub fn continuation(&self) -> Option<&str> {
		if self.error || !self.has_more {
			return None;
		}
		self.id.as_deref()
	}

	/// Split into the page payload and the continuation id, or the database error.
	pub fn into_page(self) -> Result<(Page, Option<String>)> {
		if self.error {
			return Err(Error::Database {
				message: self.error_message,
				code: self.code,
				error_num: self.error_num,
			});
		}
		let next = if self.has_more {
			self.id
		} else {
			None
		};
		let page = match self.result {
			Some(raw) => Page::new(raw),
			None => Page::empty()?,
		};
		Ok((page, next))
	}
}

/// The id is appended to the request path as-is, so it must not be able to
/// step outside its own segment.
fn is_path_segment(id: &str) -> bool {
	!id.is_empty() && id != "." && id != ".." && !id.contains(['/', '?', '#', '%']) && !id.contains(char::is_whitespace)
}
