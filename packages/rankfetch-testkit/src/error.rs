pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("RANKFETCH_PG_DSN is not a valid Postgres DSN.")]
	InvalidDsn(#[source] sqlx::Error),

	#[error("No admin database is reachable: {message}.")]
	AdminUnavailable { message: String },

	#[error("Failed to create test database {name}.")]
	Create {
		name: String,
		#[source]
		source: sqlx::Error,
	},

	#[error("Failed to load fixture models into {name}.")]
	Fixture {
		name: String,
		#[source]
		source: sqlx::Error,
	},

	#[error("Failed to drop test database {name}.")]
	Cleanup {
		name: String,
		#[source]
		source: sqlx::Error,
	},
}
