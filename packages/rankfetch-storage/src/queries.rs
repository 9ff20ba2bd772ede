use sqlx::{Postgres, QueryBuilder};

use crate::{
	Result,
	db::Db,
	models::{OrderBy, Row, TableRef},
};

/// Loads every row of `table` whose primary key, rendered as text, is in `ids`.
///
/// Rows come back in storage order: unordered unless `order` is given. Identifiers are validated
/// when `TableRef` and `OrderBy` are built, so they are safe to splice into the statement.
///
/// The key column is compared as text so one query shape serves integer, text and uuid keys.
/// That cast keeps Postgres off the primary key index: every call is a sequential scan of the
/// table. Add an expression index on `(<pk>::text)` for large tables.
pub async fn fetch_rows_by_ids(
	db: &Db,
	table: &TableRef,
	ids: &[String],
	order: Option<&OrderBy>,
) -> Result<Vec<Row>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut builder = select_by_ids(table, ids, order);
	let rows = builder.build_query_as::<Row>().fetch_all(&db.pool).await?;

	Ok(rows)
}

fn select_by_ids<'a>(
	table: &TableRef,
	ids: &'a [String],
	order: Option<&OrderBy>,
) -> QueryBuilder<'a, Postgres> {
	let pk = table.primary_key();
	let mut builder = QueryBuilder::new(format!(
		"SELECT t.{pk}::text AS id, to_jsonb(t) AS data FROM {} t WHERE t.{pk}::text = ANY(",
		table.table()
	));

	builder.push_bind(ids).push(")");

	if let Some(order) = order.filter(|order| !order.is_empty()) {
		builder.push(" ORDER BY ");

		let mut separated = builder.separated(", ");

		for key in order.keys() {
			separated.push(format!("t.{} {}", key.column(), key.direction().as_sql()));
		}
	}

	builder
}
