use rankfetch_storage::{
	db::Db,
	models::{OrderBy, Row, TableRef},
	queries,
};

use crate::{BoxFuture, Model, Record, RecordId};

/// A model backed by one Postgres table.
pub struct PgModel {
	name: String,
	table: TableRef,
	db: Db,
}
impl PgModel {
	pub fn new(name: impl Into<String>, table: TableRef, db: Db) -> Self {
		Self { name: name.into(), table, db }
	}

	pub fn table(&self) -> &TableRef {
		&self.table
	}

	async fn fetch(
		&self,
		ids: &[RecordId],
		order: Option<&OrderBy>,
	) -> color_eyre::Result<Vec<Record>> {
		let keys: Vec<String> = ids.iter().map(|id| id.key().into_owned()).collect();
		let rows = queries::fetch_rows_by_ids(&self.db, &self.table, &keys, order).await?;

		Ok(rows.into_iter().map(|Row { id, data }| Record::new(id, data)).collect())
	}
}
impl Model for PgModel {
	fn name(&self) -> &str {
		&self.name
	}

	fn fetch_by_ids<'a>(
		&'a self,
		ids: &'a [RecordId],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>> {
		Box::pin(self.fetch(ids, None))
	}

	fn fetch_by_ids_ordered<'a>(
		&'a self,
		ids: &'a [RecordId],
		order: &'a OrderBy,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Record>>> {
		Box::pin(self.fetch(ids, Some(order)))
	}
}
