use serde_json::json;
use tokio::runtime::Runtime;

use rankfetch_config::{Config, Model, Postgres, Records, Storage};
use rankfetch_records::{Error, Hit, OrderBy, RecordLoader};
use rankfetch_storage::db::Db;
use rankfetch_testkit::TestDatabase;

fn test_config(dsn: &str) -> Config {
	Config {
		storage: Storage { postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 2 } },
		records: Records { max_concurrent_fetches: 2, dedup_ids: false },
		models: vec![
			Model {
				name: "Article".to_string(),
				table: "articles".to_string(),
				primary_key: "id".to_string(),
				aliases: Vec::new(),
			},
			Model {
				name: "Author".to_string(),
				table: "authors".to_string(),
				primary_key: "author_id".to_string(),
				aliases: vec!["people".to_string()],
			},
		],
	}
}

#[test]
#[ignore = "Requires external Postgres. Set RANKFETCH_PG_DSN to run."]
fn configured_models_load_in_rank_order() {
	let Some(dsn) = rankfetch_testkit::env_dsn() else {
		eprintln!(
			"Skipping configured_models_load_in_rank_order; set RANKFETCH_PG_DSN to run this test."
		);

		return;
	};
	let rt = Runtime::new().expect("Failed to build runtime.");

	rt.block_on(async {
		let test_db = TestDatabase::with_fixture_models(&dsn)
			.await
			.expect("Failed to create test database.");
		let loader =
			RecordLoader::connect(&test_config(test_db.dsn())).await.expect("Failed to connect.");
		let records = loader.records(vec![
			Hit::new("article", "3"),
			Hit::new("people", "bob"),
			Hit::new("article", 1),
			Hit::new("article", 404),
		]);
		let loaded = records.force().await.expect("Force failed.");
		let order: Vec<(&str, String)> = loaded
			.iter()
			.map(|record| (record.model(), record.id().to_string()))
			.collect();

		assert_eq!(
			order,
			vec![
				("Article", "3".to_string()),
				("Author", "bob".to_string()),
				("Article", "1".to_string()),
			]
		);
		assert_eq!(loaded.for_model("Author")[0].data()["name"], json!("Bob"));

		test_db.cleanup().await.expect("Failed to clean up test database.");
	});
}

#[test]
#[ignore = "Requires external Postgres. Set RANKFETCH_PG_DSN to run."]
fn override_sorts_rows_in_storage() {
	let Some(dsn) = rankfetch_testkit::env_dsn() else {
		eprintln!("Skipping override_sorts_rows_in_storage; set RANKFETCH_PG_DSN to run this test.");

		return;
	};
	let rt = Runtime::new().expect("Failed to build runtime.");

	rt.block_on(async {
		let test_db = TestDatabase::with_fixture_models(&dsn)
			.await
			.expect("Failed to create test database.");
		let loader =
			RecordLoader::connect(&test_config(test_db.dsn())).await.expect("Failed to connect.");
		let records = loader.records(vec![
			Hit::new("article", 1),
			Hit::new("article", 2),
			Hit::new("article", 3),
		]);
		let order = OrderBy::new().asc("title").expect("Column is valid.");
		let loaded = records.request_override(order).await.expect("Override failed.");
		let ids: Vec<String> = loaded.iter().map(|record| record.id().to_string()).collect();

		assert_eq!(ids, vec!["2", "1", "3"]);

		test_db.cleanup().await.expect("Failed to clean up test database.");
	});
}

#[test]
fn invalid_table_names_are_rejected_at_registration() {
	let rt = Runtime::new().expect("Failed to build runtime.");

	rt.block_on(async {
		let pool = sqlx::postgres::PgPoolOptions::new()
			.connect_lazy("postgres://nobody@127.0.0.1:1/none")
			.expect("Lazy pool does not connect.");
		let db = Db { pool };
		let mut cfg = test_config("postgres://nobody@127.0.0.1:1/none");

		cfg.models[0].table = "articles; DROP TABLE authors".to_string();

		let result = rankfetch_records::TypeRegistry::from_config(&cfg.models, &db);

		assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	});
}
