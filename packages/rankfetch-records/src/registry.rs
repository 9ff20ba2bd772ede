use std::sync::Arc;

use rankfetch_storage::{db::Db, models::TableRef};

use crate::{Error, Model, Result, pg::PgModel};

type TagPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

struct Entry {
	predicate: TagPredicate,
	model: Arc<dyn Model>,
}

/// Maps hit tags to models.
///
/// Entries are checked in registration order and the first matching predicate wins.
/// [`TypeRegistry::register_model`] installs the naming convention used throughout: a tag
/// resolves to a model when it equals the model name ignoring ASCII case, so the singular tag
/// `article` resolves to the model named `Article`. Plural or otherwise different tags need an
/// explicit alias.
#[derive(Default)]
pub struct TypeRegistry {
	entries: Vec<Entry>,
}
impl TypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers one `PgModel` per configured model, followed by its aliases.
	pub fn from_config(models: &[rankfetch_config::Model], db: &Db) -> Result<Self> {
		let mut registry = Self::new();

		for cfg in models {
			let table = TableRef::new(&cfg.table, &cfg.primary_key)?;
			let model: Arc<dyn Model> =
				Arc::new(PgModel::new(cfg.name.as_str(), table, db.clone()));

			registry.register_model(model.clone());

			for alias in &cfg.aliases {
				registry.register_alias(alias, model.clone());
			}
		}

		Ok(registry)
	}

	pub fn register<P>(&mut self, predicate: P, model: Arc<dyn Model>)
	where
		P: Fn(&str) -> bool + Send + Sync + 'static,
	{
		self.entries.push(Entry { predicate: Box::new(predicate), model });
	}

	pub fn register_model(&mut self, model: Arc<dyn Model>) {
		let name = model.name().to_string();

		self.register(move |tag| tag.eq_ignore_ascii_case(&name), model);
	}

	pub fn register_alias(&mut self, alias: &str, model: Arc<dyn Model>) {
		let alias = alias.to_string();

		self.register(move |tag| tag.eq_ignore_ascii_case(&alias), model);
	}

	pub fn resolve(&self, tag: &str) -> Result<Arc<dyn Model>> {
		self.entries
			.iter()
			.find(|entry| (entry.predicate)(tag))
			.map(|entry| entry.model.clone())
			.ok_or_else(|| Error::UnknownType { tag: tag.to_string() })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
