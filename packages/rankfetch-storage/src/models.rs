use regex::Regex;
use serde_json::Value;

use crate::{Error, Result};

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// One stored row, keyed by its primary key rendered as text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Row {
	pub id: String,
	pub data: Value,
}

/// A validated `table` (optionally `schema.table`) and primary key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
	table: String,
	primary_key: String,
}
impl TableRef {
	pub fn new(table: &str, primary_key: &str) -> Result<Self> {
		let parts: Vec<&str> = table.split('.').collect();

		if parts.len() > 2 || !parts.iter().all(|part| is_identifier(part)) {
			return Err(Error::InvalidArgument(format!("Invalid table name {table:?}.")));
		}
		if !is_identifier(primary_key) {
			return Err(Error::InvalidArgument(format!(
				"Invalid primary key column {primary_key:?}."
			)));
		}

		Ok(Self { table: table.to_string(), primary_key: primary_key.to_string() })
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn primary_key(&self) -> &str {
		&self.primary_key
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}
impl Direction {
	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
	column: String,
	direction: Direction,
}
impl SortKey {
	pub fn column(&self) -> &str {
		&self.column
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}
}

/// Caller supplied ordering that replaces search rank with storage order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderBy {
	keys: Vec<SortKey>,
}
impl OrderBy {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn asc(self, column: &str) -> Result<Self> {
		self.then(column, Direction::Asc)
	}

	pub fn desc(self, column: &str) -> Result<Self> {
		self.then(column, Direction::Desc)
	}

	pub fn then(mut self, column: &str, direction: Direction) -> Result<Self> {
		if !is_identifier(column) {
			return Err(Error::InvalidArgument(format!("Invalid sort column {column:?}.")));
		}

		self.keys.push(SortKey { column: column.to_string(), direction });

		Ok(self)
	}

	pub fn keys(&self) -> &[SortKey] {
		&self.keys
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

pub fn is_identifier(value: &str) -> bool {
	Regex::new(IDENTIFIER_PATTERN).map(|re| re.is_match(value)).unwrap_or(false)
}
