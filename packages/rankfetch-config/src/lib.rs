mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Model, Postgres, Records, Storage};

use std::{collections::HashMap, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.records.max_concurrent_fetches == 0 {
		return Err(Error::Validation {
			message: "records.max_concurrent_fetches must be greater than zero.".to_string(),
		});
	}

	// Tag -> owning model name, compared ignoring ASCII case.
	let mut tags: HashMap<String, &str> = HashMap::new();

	for model in &cfg.models {
		for (label, value) in [
			("models.name", &model.name),
			("models.table", &model.table),
			("models.primary_key", &model.primary_key),
		] {
			if value.is_empty() {
				return Err(Error::Validation { message: format!("{label} must be non-empty.") });
			}
		}

		for tag in std::iter::once(&model.name).chain(model.aliases.iter()) {
			if let Some(owner) = tags.insert(tag.to_ascii_lowercase(), model.name.as_str()) {
				return Err(Error::Validation {
					message: format!(
						"Tag {tag:?} of model {:?} is already claimed by model {owner:?}.",
						model.name
					),
				});
			}
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.storage.postgres.dsn = cfg.storage.postgres.dsn.trim().to_string();

	for model in &mut cfg.models {
		model.name = model.name.trim().to_string();
		model.table = model.table.trim().to_string();
		model.primary_key = model.primary_key.trim().to_string();
		model.aliases = model
			.aliases
			.iter()
			.map(|alias| alias.trim().to_string())
			.filter(|alias| !alias.is_empty())
			.collect();
	}
}
