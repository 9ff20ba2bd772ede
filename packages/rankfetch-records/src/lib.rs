pub mod fetch;
pub mod group;
pub mod hits;
pub mod lazy;
pub mod model;
pub mod pg;
pub mod reassemble;
pub mod registry;
pub mod view;

mod error;

pub use error::{Error, Result};
pub use hits::{Hit, RecordId, SearchResults, parse_hits};
pub use lazy::LazyRecords;
pub use model::{Model, Record};
pub use pg::PgModel;
pub use rankfetch_storage::models::{Direction, OrderBy};
pub use registry::TypeRegistry;
pub use view::{OrderMode, Records};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use rankfetch_config::Config;
use rankfetch_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Entry point: turns search hits into lazily loaded records.
pub struct RecordLoader {
	registry: Arc<TypeRegistry>,
	settings: rankfetch_config::Records,
}
impl RecordLoader {
	pub fn new(registry: TypeRegistry, settings: rankfetch_config::Records) -> Self {
		Self { registry: Arc::new(registry), settings }
	}

	/// Connects to Postgres and registers every configured model.
	pub async fn connect(cfg: &Config) -> Result<Self> {
		let db = Db::connect(&cfg.storage.postgres).await?;
		let registry = TypeRegistry::from_config(&cfg.models, &db)?;

		tracing::info!(models = cfg.models.len(), "Record loader ready.");

		Ok(Self::new(registry, cfg.records.clone()))
	}

	pub fn registry(&self) -> &TypeRegistry {
		&self.registry
	}

	pub fn records(&self, hits: Vec<Hit>) -> LazyRecords {
		LazyRecords::new(hits, self.registry.clone(), self.settings.clone())
	}

	/// Parses a raw search response. Fetching is still deferred until the records are forced.
	pub fn records_for_response(&self, raw: &Value) -> Result<LazyRecords> {
		Ok(self.records(parse_hits(raw)?))
	}
}
