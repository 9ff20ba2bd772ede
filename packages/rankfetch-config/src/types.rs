use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub storage: Storage,
	#[serde(default)]
	pub records: Records,
	#[serde(default)]
	pub models: Vec<Model>,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Records {
	/// Upper bound on per-model bulk fetches running at the same time.
	#[serde(default = "default_max_concurrent_fetches")]
	pub max_concurrent_fetches: usize,
	/// Collapse repeated ids inside one model group before fetching.
	#[serde(default)]
	pub dedup_ids: bool,
}
impl Default for Records {
	fn default() -> Self {
		Self { max_concurrent_fetches: default_max_concurrent_fetches(), dedup_ids: false }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
	/// Display name; hit tags resolve to it ignoring ASCII case.
	pub name: String,
	pub table: String,
	#[serde(default = "default_primary_key")]
	pub primary_key: String,
	/// Optional. Extra tags that resolve to this model.
	#[serde(default)]
	pub aliases: Vec<String>,
}

fn default_max_concurrent_fetches() -> usize {
	4
}

fn default_primary_key() -> String {
	"id".to_string()
}
