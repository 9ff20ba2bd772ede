use std::collections::HashMap;

use crate::{Hit, Record, group::Grouping};

/// Puts fetched records back into hit order.
///
/// `fetched[i]` holds the records loaded for `grouping.groups[i]`. Each record is placed once, at
/// its first matching hit. Hits without a record are skipped, so the output can be shorter than
/// `hits`. When storage returns the same id twice, the first row wins.
pub fn reassemble(hits: &[Hit], grouping: &Grouping, fetched: Vec<Vec<Record>>) -> Vec<Record> {
	let mut slots: Vec<Vec<Option<Record>>> = Vec::with_capacity(fetched.len());
	let mut index_by_key: Vec<HashMap<String, usize>> = Vec::with_capacity(fetched.len());

	for records in fetched {
		let mut keys = HashMap::with_capacity(records.len());

		for (position, record) in records.iter().enumerate() {
			keys.entry(record.id().key().into_owned()).or_insert(position);
		}

		index_by_key.push(keys);
		slots.push(records.into_iter().map(Some).collect());
	}

	let mut ordered = Vec::with_capacity(hits.len());

	for (hit, group) in hits.iter().zip(grouping.hit_groups.iter().copied()) {
		let Some(position) = index_by_key.get(group).and_then(|keys| keys.get(hit.id.key().as_ref()))
		else {
			tracing::warn!(
				model = %grouping.groups[group].name,
				id = %hit.id,
				"Search hit has no stored record."
			);

			continue;
		};

		// Already placed at an earlier hit for the same id.
		if let Some(record) = slots[group][*position].take() {
			ordered.push(record);
		}
	}

	for (group, remaining) in slots.iter().enumerate() {
		for record in remaining.iter().flatten() {
			tracing::warn!(
				model = %grouping.groups[group].name,
				id = %record.id(),
				"Stored record matches no search hit."
			);
		}
	}

	ordered
}
