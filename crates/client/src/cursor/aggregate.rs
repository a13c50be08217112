// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::de::Error as _;

use crate::{
	error::{Error, Result},
	page::Page,
};

/// Merges pages, in arrival order, into one JSON array.
///
/// A run made of a single non-array page (a transaction's return value) is
/// passed through unchanged.
#[derive(Debug, Default)]
pub(crate) struct Aggregate {
	buffer: String,
	elements: usize,
	pages: usize,
	scalar: Option<Page>,
}

impl Aggregate {
	pub(crate) fn push(&mut self, page: Page) -> Result<()> {
		self.pages += 1;

		if !page.is_array() {
			if self.pages > 1 {
				return Err(scalar_in_multi_page());
			}
			self.scalar = Some(page);
			return Ok(());
		}
		if self.scalar.is_some() {
			return Err(scalar_in_multi_page());
		}

		for element in page.elements()? {
			if self.elements > 0 {
				self.buffer.push(',');
			}
			self.buffer.push_str(element.get());
			self.elements += 1;
		}
		Ok(())
	}

	pub(crate) fn finish(self) -> Vec<u8> {
		if let Some(scalar) = self.scalar {
			return scalar.into_bytes();
		}
		let mut out = Vec::with_capacity(self.buffer.len() + 2);
		out.push(b'[');
		out.extend_from_slice(self.buffer.as_bytes());
		out.push(b']');
		out
	}
}

fn scalar_in_multi_page() -> Error {
	Error::Decode(serde_json::Error::custom("non-array result in a multi-page cursor"))
}
