use crate::RecordId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown record type tag {tag:?}.")]
	UnknownType { tag: String },
	#[error("Failed to fetch {model} records [{}]: {message}", join_ids(.ids))]
	Fetch { model: String, ids: Vec<RecordId>, message: String },
	#[error("Invalid state: {message}")]
	State { message: String },
	#[error("Invalid search response: {message}")]
	InvalidResponse { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<rankfetch_storage::Error> for Error {
	fn from(err: rankfetch_storage::Error) -> Self {
		match err {
			rankfetch_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			rankfetch_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

fn join_ids(ids: &[RecordId]) -> String {
	ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
