//! Throwaway Postgres databases for record loading tests.
//!
//! Tests point `RANKFETCH_PG_DSN` at any reachable server. Each [`TestDatabase`] lives in its own
//! freshly created database on that server and is dropped again afterwards.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

const DSN_ENV: &str = "RANKFETCH_PG_DSN";
const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];
/// Two models with differently typed keys: `articles` keyed by `BIGINT id`, `authors` keyed by
/// `TEXT author_id`. Titles are out of id order so storage sorting is observable.
const FIXTURE_MODELS_SQL: &str = "\
CREATE TABLE articles (id BIGINT PRIMARY KEY, title TEXT NOT NULL);
CREATE TABLE authors (author_id TEXT PRIMARY KEY, name TEXT NOT NULL);
INSERT INTO articles (id, title) VALUES (1, 'beta'), (2, 'alpha'), (3, 'gamma');
INSERT INTO authors (author_id, name) VALUES ('ann', 'Ann'), ('bob', 'Bob');";

/// A uniquely named database created beside the one `RANKFETCH_PG_DSN` names.
///
/// Dropped on [`TestDatabase::cleanup`], or from a helper thread on `Drop` when a test bails
/// out early.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	/// An empty database.
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn).map_err(Error::InvalidDsn)?;
		let (admin, mut conn) = connect_admin(&base).await?;
		let name = format!("rankfetch_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|source| Error::Create { name: name.clone(), source })?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	/// A database holding the `articles` and `authors` fixture tables.
	///
	/// | table | key | rows |
	/// |---|---|---|
	/// | `articles` | `id BIGINT` | `(1, beta)`, `(2, alpha)`, `(3, gamma)` |
	/// | `authors` | `author_id TEXT` | `(ann, Ann)`, `(bob, Bob)` |
	pub async fn with_fixture_models(base_dsn: &str) -> Result<Self> {
		let db = Self::new(base_dsn).await?;
		let options = PgConnectOptions::from_str(&db.dsn).map_err(Error::InvalidDsn)?;
		let fixture_error =
			|source: sqlx::Error| Error::Fixture { name: db.name.clone(), source };
		let mut conn = PgConnection::connect_with(&options).await.map_err(fixture_error)?;

		// Simple-query protocol, so the whole script runs as one batch.
		conn.execute(FIXTURE_MODELS_SQL).await.map_err(fixture_error)?;
		conn.close().await.map_err(fixture_error)?;

		Ok(db)
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		drop_database(&self.name, &self.admin).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let admin = self.admin.clone();
		let handle = thread::spawn(move || {
			let result = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime.block_on(drop_database(&name, &admin)).map_err(|err| err.to_string())
				});

			if let Err(err) = result {
				eprintln!("Leaked test database {name}: {err}");
			}
		});
		let _ = handle.join();
	}
}

/// The base DSN, or `None` when Postgres tests should be skipped.
pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}

async fn connect_admin(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in ADMIN_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::AdminUnavailable { message: failures.join("; ") })
}

async fn drop_database(name: &str, admin: &PgConnectOptions) -> Result<()> {
	let cleanup_error = |source: sqlx::Error| Error::Cleanup { name: name.to_string(), source };
	let mut conn = PgConnection::connect_with(admin).await.map_err(cleanup_error)?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str())
		.await
		.map_err(cleanup_error)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn malformed_dsn_is_reported_before_connecting() {
		let runtime = Builder::new_current_thread().enable_all().build().expect("Runtime builds.");
		let result = runtime.block_on(TestDatabase::new("not a dsn"));

		assert!(matches!(result, Err(Error::InvalidDsn(_))));
	}

	#[test]
	fn fixture_covers_both_key_types() {
		assert!(FIXTURE_MODELS_SQL.contains("id BIGINT PRIMARY KEY"));
		assert!(FIXTURE_MODELS_SQL.contains("author_id TEXT PRIMARY KEY"));
	}
}
