use std::sync::Arc;

use tokio::sync::Mutex;

use rankfetch_storage::models::OrderBy;

use crate::{
	Error, Hit, Record, Result, TypeRegistry, fetch, group, reassemble,
	view::{OrderMode, Records},
};

enum State {
	Unforced,
	/// Set by `request_override`; kept if the ordered fetch fails so a retry stays ordered.
	OverrideRequested(OrderBy),
	Forced(Arc<Records>),
}

/// Records for a list of search hits, loaded on first use.
///
/// Nothing is fetched until the records are forced, either directly or through any consuming
/// method. The first successful force is cached and every later call returns it. Concurrent
/// callers wait for the in-flight force instead of starting their own.
pub struct LazyRecords {
	hits: Vec<Hit>,
	registry: Arc<TypeRegistry>,
	settings: rankfetch_config::Records,
	state: Mutex<State>,
}
impl LazyRecords {
	pub fn new(
		hits: Vec<Hit>,
		registry: Arc<TypeRegistry>,
		settings: rankfetch_config::Records,
	) -> Self {
		Self { hits, registry, settings, state: Mutex::new(State::Unforced) }
	}

	pub fn hits(&self) -> &[Hit] {
		&self.hits
	}

	pub async fn is_forced(&self) -> bool {
		matches!(*self.state.lock().await, State::Forced(_))
	}

	pub async fn force(&self) -> Result<Arc<Records>> {
		let mut state = self.state.lock().await;

		self.force_locked(&mut state).await
	}

	/// Drops search rank in favour of storage order under `order`, then forces.
	///
	/// Only valid before the records are forced. Once requested, this instance never returns to
	/// rank order.
	pub async fn request_override(&self, order: OrderBy) -> Result<Arc<Records>> {
		let mut state = self.state.lock().await;

		if matches!(*state, State::Forced(_)) {
			return Err(Error::State {
				message: "Ordering cannot be overridden after records are loaded.".to_string(),
			});
		}

		*state = State::OverrideRequested(order);

		self.force_locked(&mut state).await
	}

	pub async fn count(&self) -> Result<usize> {
		Ok(self.force().await?.len())
	}

	pub async fn to_vec(&self) -> Result<Vec<Record>> {
		Ok(self.force().await?.as_slice().to_vec())
	}

	/// Forces, then keeps the records whose model name equals `model` exactly.
	pub async fn for_model(&self, model: &str) -> Result<Vec<Record>> {
		let records = self.force().await?;

		Ok(records.for_model(model).into_iter().cloned().collect())
	}

	async fn force_locked(&self, state: &mut State) -> Result<Arc<Records>> {
		let order = match state {
			State::Forced(records) => return Ok(records.clone()),
			State::Unforced => None,
			State::OverrideRequested(order) => Some(order.clone()),
		};
		let records = Arc::new(self.materialize(order.as_ref()).await?);

		*state = State::Forced(records.clone());

		Ok(records)
	}

	async fn materialize(&self, order: Option<&OrderBy>) -> Result<Records> {
		let grouping = group::group_hits(&self.hits, &self.registry, self.settings.dedup_ids)?;
		let mode = if order.is_some() { OrderMode::Storage } else { OrderMode::Ranked };

		tracing::debug!(
			hits = self.hits.len(),
			groups = grouping.groups.len(),
			mode = ?mode,
			"Loading records for search hits."
		);

		let fetched =
			fetch::fetch_groups(&grouping.groups, order, self.settings.max_concurrent_fetches)
				.await?;
		let records = match mode {
			OrderMode::Ranked => reassemble::reassemble(&self.hits, &grouping, fetched),
			OrderMode::Storage => fetched.into_iter().flatten().collect(),
		};

		Ok(Records::new(records, mode))
	}
}
