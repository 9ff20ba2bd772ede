use std::{borrow::Cow, fmt};

use serde_json::Value;

use crate::{Error, Result};

const PLACEHOLDER_TYPE: &str = "_doc";

/// Primary key of a stored record as reported by search or storage.
///
/// Search engines report ids as strings while storage may hand back integers, so ids are matched
/// on their text form (see [`RecordId::key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
	Int(i64),
	Str(String),
}
impl RecordId {
	/// Normalized text form used for every cross-source comparison.
	pub fn key(&self) -> Cow<'_, str> {
		match self {
			Self::Int(value) => Cow::Owned(value.to_string()),
			Self::Str(value) => Cow::Borrowed(value.as_str()),
		}
	}

	pub fn matches(&self, other: &RecordId) -> bool {
		self.key() == other.key()
	}
}
impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(value) => write!(f, "{value}"),
			Self::Str(value) => f.write_str(value),
		}
	}
}
impl From<i64> for RecordId {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<i32> for RecordId {
	fn from(value: i32) -> Self {
		Self::Int(value.into())
	}
}
impl From<u32> for RecordId {
	fn from(value: u32) -> Self {
		Self::Int(value.into())
	}
}
impl From<&str> for RecordId {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}
impl From<String> for RecordId {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

/// A ranked reference to one stored record. Position in the hit list is the rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
	pub tag: String,
	pub id: RecordId,
}
impl Hit {
	pub fn new(tag: impl Into<String>, id: impl Into<RecordId>) -> Self {
		Self { tag: tag.into(), id: id.into() }
	}
}

/// Parsed hits together with the raw engine payload they came from.
#[derive(Debug, Clone)]
pub struct SearchResults {
	pub hits: Vec<Hit>,
	pub raw: Value,
}
impl SearchResults {
	pub fn from_response(raw: Value) -> Result<Self> {
		let hits = parse_hits(&raw)?;

		Ok(Self { hits, raw })
	}
}

/// Reads `hits.hits[]` from a search engine response.
///
/// The tag is `_type`, or `_index` when `_type` is missing, empty, or the placeholder `_doc` of
/// engines that no longer report document types.
pub fn parse_hits(raw: &Value) -> Result<Vec<Hit>> {
	let Some(entries) = raw.get("hits").and_then(|hits| hits.get("hits")).and_then(Value::as_array)
	else {
		return Err(Error::InvalidResponse { message: "Missing hits.hits array.".to_string() });
	};

	entries.iter().enumerate().map(|(position, entry)| parse_hit(position, entry)).collect()
}

fn parse_hit(position: usize, entry: &Value) -> Result<Hit> {
	let tag = entry
		.get("_type")
		.and_then(Value::as_str)
		.filter(|tag| !tag.is_empty() && *tag != PLACEHOLDER_TYPE)
		.or_else(|| entry.get("_index").and_then(Value::as_str))
		.filter(|tag| !tag.is_empty())
		.ok_or_else(|| Error::InvalidResponse {
			message: format!("Hit {position} has no _type or _index."),
		})?;
	let id = match entry.get("_id") {
		Some(Value::String(id)) => Some(RecordId::Str(id.clone())),
		Some(Value::Number(id)) if id.is_i64() => id.as_i64().map(RecordId::Int),
		// Keys beyond i64 keep their exact digits as text.
		Some(Value::Number(id)) if id.is_u64() => Some(RecordId::Str(id.to_string())),
		_ => None,
	}
	.ok_or_else(|| Error::InvalidResponse {
		message: format!("Hit {position} has no string or integer _id."),
	})?;

	Ok(Hit { tag: tag.to_string(), id })
}
