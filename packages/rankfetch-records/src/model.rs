use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use rankfetch_storage::models::OrderBy;

use crate::{BoxFuture, RecordId};

/// A record type that can load its rows by primary key.
pub trait Model
where
	Self: Send + Sync,
{
	fn name(&self) -> &str;

	/// Rows for `ids` in whatever order storage returns them. Missing ids are simply absent.
	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [RecordId],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>>;

	/// Rows for `ids` sorted by `order` on the storage side.
	fn fetch_by_ids_ordered<'a>(
		&'a self,
		ids: &'a [RecordId],
		order: &'a OrderBy,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>>;
}

/// A hydrated row. The owning model is stamped by the fetcher, not by the storage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	model: Arc<str>,
	id: RecordId,
	data: Value,
}
impl Record {
	pub fn new(id: impl Into<RecordId>, data: Value) -> Self {
		Self { model: Arc::from(""), id: id.into(), data }
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	pub fn id(&self) -> &RecordId {
		&self.id
	}

	pub fn data(&self) -> &Value {
		&self.data
	}

	pub fn into_data(self) -> Value {
		self.data
	}

	pub fn decode<T>(&self) -> serde_json::Result<T>
	where
		T: DeserializeOwned,
	{
		T::deserialize(&self.data)
	}

	pub(crate) fn with_model(mut self, model: &Arc<str>) -> Self {
		self.model = model.clone();

		self
	}
}
