use std::slice;

use crate::Record;

/// How a materialized record list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
	/// Search relevance: the position of each record's first hit.
	Ranked,
	/// Storage order under caller supplied criteria, grouped by model in first-hit order.
	Storage,
}

/// Materialized records of one search response.
#[derive(Debug)]
pub struct Records {
	records: Vec<Record>,
	mode: OrderMode,
}
impl Records {
	pub(crate) fn new(records: Vec<Record>, mode: OrderMode) -> Self {
		Self { records, mode }
	}

	pub fn mode(&self) -> OrderMode {
		self.mode
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> slice::Iter<'_, Record> {
		self.records.iter()
	}

	pub fn as_slice(&self) -> &[Record] {
		&self.records
	}

	/// Records of one model, in the same relative order as the full list.
	///
	/// `model` is compared with [`Model::name`](crate::Model::name) exactly. Unlike tag
	/// resolution it is not case-insensitive, so pass the registered name (`Article`), not a hit
	/// tag (`article`).
	pub fn for_model(&self, model: &str) -> Vec<&Record> {
		self.records.iter().filter(|record| record.model() == model).collect()
	}
}
impl<'a> IntoIterator for &'a Records {
	type IntoIter = slice::Iter<'a, Record>;
	type Item = &'a Record;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}
