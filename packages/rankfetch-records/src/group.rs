use std::{
	collections::{HashMap, HashSet},
	sync::Arc,
};

use crate::{Hit, Model, RecordId, Result, TypeRegistry};

pub struct ModelGroup {
	pub model: Arc<dyn Model>,
	/// Stamped onto every record fetched for this group.
	pub name: Arc<str>,
	pub ids: Vec<RecordId>,
}

/// Hits partitioned by model.
///
/// Groups appear in the order their model first occurs in the hits, and ids keep their relative
/// hit order inside a group. `hit_groups[i]` is the group index of `hits[i]`.
pub struct Grouping {
	pub groups: Vec<ModelGroup>,
	pub hit_groups: Vec<usize>,
}

/// Resolves every hit tag and partitions the ids. Any unknown tag fails the whole grouping.
pub fn group_hits(hits: &[Hit], registry: &TypeRegistry, dedup_ids: bool) -> Result<Grouping> {
	let mut groups: Vec<ModelGroup> = Vec::new();
	// Keyed by the resolved model instance; distinct models may share a display name.
	let mut group_by_model: HashMap<*const (), usize> = HashMap::new();
	let mut seen: Vec<HashSet<String>> = Vec::new();
	let mut hit_groups = Vec::with_capacity(hits.len());

	for hit in hits {
		let model = registry.resolve(&hit.tag)?;
		let identity = Arc::as_ptr(&model) as *const ();
		let index = match group_by_model.get(&identity) {
			Some(index) => *index,
			None => {
				let index = groups.len();
				let name: Arc<str> = Arc::from(model.name());

				group_by_model.insert(identity, index);
				groups.push(ModelGroup { model, name, ids: Vec::new() });
				seen.push(HashSet::new());

				index
			},
		};

		hit_groups.push(index);

		if dedup_ids && !seen[index].insert(hit.id.key().into_owned()) {
			continue;
		}

		groups[index].ids.push(hit.id.clone());
	}

	Ok(Grouping { groups, hit_groups })
}
