//! Repository contracts and SQLite implementations for blog records.
//!
//! # Responsibility
//! - Keep SQL for `authors` and `posts` behind small CRUD traits.
//! - Translate store failures into semantic errors (`DuplicateName`,
//!   `NotFound`) separate from transport errors.
//!
//! # Invariants
//! - Every write re-runs the record validators before touching SQL.
//! - Every write is one immediate transaction; a failed write is rolled back.
//! - Reads do not re-validate; rows that predate a rule still load.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;
mod schema;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by author/post persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// A field broke its rule before the store was contacted.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// `authors.name` uniqueness was violated; the write was rolled back.
    DuplicateName(String),
    /// No row exists for the given id.
    NotFound(RecordId),
    /// Update was requested for a record that was never stored.
    Unsaved,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be represented by the record type.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "an author named `{name}` already exists"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Unsaved => write!(f, "record has not been stored yet"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "blog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "blog repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "blog repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateName(_)
            | Self::NotFound(_)
            | Self::Unsaved
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
