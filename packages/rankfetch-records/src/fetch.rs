use futures_util::{StreamExt, stream};

use rankfetch_storage::models::OrderBy;

use crate::{Error, Record, Result, group::ModelGroup};

/// Runs one bulk fetch per group, at most `max_concurrent` at a time.
///
/// Every fetch runs to completion before results are inspected. The first failing group, in group
/// order, fails the whole call and no records are returned. The result at index `i` belongs to
/// `groups[i]`.
pub async fn fetch_groups(
	groups: &[ModelGroup],
	order: Option<&OrderBy>,
	max_concurrent: usize,
) -> Result<Vec<Vec<Record>>> {
	let fetched = stream::iter(groups.iter().map(|group| fetch_group(group, order)))
		.buffered(max_concurrent.max(1))
		.collect::<Vec<_>>()
		.await;

	fetched.into_iter().collect()
}

async fn fetch_group(group: &ModelGroup, order: Option<&OrderBy>) -> Result<Vec<Record>> {
	let fetched = match order {
		Some(order) => group.model.fetch_by_ids_ordered(&group.ids, order).await,
		None => group.model.fetch_by_ids(&group.ids).await,
	};
	let records = fetched.map_err(|err| Error::Fetch {
		model: group.name.to_string(),
		ids: group.ids.clone(),
		message: err.to_string(),
	})?;

	Ok(records.into_iter().map(|record| record.with_model(&group.name)).collect())
}
