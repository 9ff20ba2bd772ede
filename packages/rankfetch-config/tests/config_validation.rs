use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use rankfetch_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn render(value: &Value) -> String {
	toml::to_string(value).expect("Failed to render template config.")
}

fn sample_toml_with_records(max_concurrent_fetches: i64, dedup_ids: bool) -> String {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");
	let records = root
		.get_mut("records")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [records].");

	records.insert("max_concurrent_fetches".to_string(), Value::Integer(max_concurrent_fetches));
	records.insert("dedup_ids".to_string(), Value::Boolean(dedup_ids));

	render(&value)
}

fn sample_toml_with_alias(model_index: usize, alias: &str) -> String {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");
	let model = root
		.get_mut("models")
		.and_then(Value::as_array_mut)
		.and_then(|models| models.get_mut(model_index))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [[models]].");
	let aliases = model
		.entry("aliases".to_string())
		.or_insert_with(|| Value::Array(Vec::new()))
		.as_array_mut()
		.expect("models.aliases must be an array.");

	aliases.push(Value::String(alias.to_string()));

	render(&value)
}

fn write_temp_config(payload: String) -> PathBuf {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be after UNIX epoch.")
		.as_nanos();
	let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
	let path = env::temp_dir().join(format!("rankfetch_config_test_{nanos}_{seq}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> rankfetch_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = rankfetch_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation(result: rankfetch_config::Result<Config>, needle: &str) {
	match result {
		Err(Error::Validation { message }) => {
			assert!(message.contains(needle), "Unexpected validation message: {message}");
		},
		Err(err) => panic!("Expected validation error, got {err:?}."),
		Ok(_) => panic!("Expected validation error, got a config."),
	}
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config should load.");

	assert_eq!(cfg.storage.postgres.pool_max_conns, 4);
	assert_eq!(cfg.records.max_concurrent_fetches, 4);
	assert!(!cfg.records.dedup_ids);
	assert_eq!(cfg.models.len(), 2);
	assert_eq!(cfg.models[0].aliases, vec!["post".to_string()]);
}

#[test]
fn primary_key_defaults_to_id() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config should load.");

	assert_eq!(cfg.models[1].name, "Author");
	assert_eq!(cfg.models[1].primary_key, "id");
	assert!(cfg.models[1].aliases.is_empty());
}

#[test]
fn records_section_is_optional() {
	let mut value = sample_value();

	value.as_table_mut().expect("Template config must be a table.").remove("records");

	let cfg = load_payload(render(&value)).expect("Config without [records] should load.");

	assert_eq!(cfg.records.max_concurrent_fetches, 4);
	assert!(!cfg.records.dedup_ids);
}

#[test]
fn dedup_ids_is_read() {
	let cfg = load_payload(sample_toml_with_records(2, true)).expect("Config should load.");

	assert!(cfg.records.dedup_ids);
	assert_eq!(cfg.records.max_concurrent_fetches, 2);
}

#[test]
fn zero_concurrency_is_rejected() {
	expect_validation(
		load_payload(sample_toml_with_records(0, false)),
		"records.max_concurrent_fetches must be greater than zero.",
	);
}

#[test]
fn duplicate_tags_are_rejected_ignoring_case() {
	expect_validation(load_payload(sample_toml_with_alias(1, "ARTICLE")), "already claimed");
}

#[test]
fn blank_aliases_are_dropped() {
	let cfg = load_payload(sample_toml_with_alias(1, "   ")).expect("Config should load.");

	assert!(cfg.models[1].aliases.is_empty());
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("rankfetch_config_test_missing.toml");
	let result = rankfetch_config::load(&path);

	assert!(matches!(result, Err(Error::ReadConfig { .. })));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let result = load_payload("[storage.postgres\n".to_string());

	assert!(matches!(result, Err(Error::ParseConfig { .. })));
}
