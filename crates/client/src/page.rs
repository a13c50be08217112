// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{de::DeserializeOwned, de::Error as _};
use serde_json::value::RawValue;

use crate::error::{Error, Result};

/// The `result` payload of one envelope, kept as the server sent it.
#[derive(Debug, Clone)]
pub struct Page {
	raw: Box<RawValue>,
}

impl Page {
	pub(crate) fn new(raw: Box<RawValue>) -> Self {
		Self {
			raw,
		}
	}

	pub(crate) fn empty() -> Result<Self> {
		RawValue::from_string("[]".to_string()).map(Self::new).map_err(Error::Decode)
	}

	/// Raw JSON text.
	pub fn get(&self) -> &str {
		self.raw.get()
	}

	pub fn as_bytes(&self) -> &[u8] {
		self.raw.get().as_bytes()
	}

	pub fn into_bytes(self) -> Vec<u8> {
		let text: Box<str> = self.raw.into();
		text.into_string().into_bytes()
	}

	pub fn is_array(&self) -> bool {
		self.raw.get().trim_start().starts_with('[')
	}

	/// Elements of an array page, each borrowed verbatim.
	pub fn elements(&self) -> Result<Vec<&RawValue>> {
		if !self.is_array() {
			return Err(Error::Decode(serde_json::Error::custom("page result is not an array")));
		}
		serde_json::from_str(self.raw.get()).map_err(Error::Decode)
	}

	pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_str(self.raw.get()).map_err(Error::Decode)
	}
}
