//! Author use-case service.
//!
//! # Responsibility
//! - Provide the `add_author` entry point: build, insert, report outcome.
//! - Delegate persistence to an `AuthorRepository`.
//!
//! # Invariants
//! - Validation failures are returned before the store is contacted.
//! - A duplicate name is returned as `RepoError::DuplicateName` after the
//!   insert has been rolled back; it is never swallowed.
//! - Log events carry metadata only, never names or phone numbers.

use crate::model::author::Author;
use crate::model::RecordId;
use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::RepoResult;
use crate::service::log_write_failure;
use log::info;
use rusqlite::Connection;
use std::fmt::Display;

/// Builds an author and stores it on `conn` in one transaction.
///
/// # Errors
/// - `RepoError::Validation` when `name` or `phone_number` breaks its rule.
/// - `RepoError::DuplicateName` when an author with `name` already exists;
///   nothing is written.
/// - `RepoError::Db` for any other store failure.
pub fn add_author(
    conn: &mut Connection,
    name: &str,
    phone_number: impl Display,
) -> RepoResult<Author> {
    let author = Author::new(name, phone_number)?;
    let repo = SqliteAuthorRepository::try_new(conn)?;
    AuthorService::new(repo).create_author(&author)
}

/// Use-case service wrapper for author persistence.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates input, then stores a new author.
    pub fn add_author(&mut self, name: &str, phone_number: impl Display) -> RepoResult<Author> {
        let author = Author::new(name, phone_number)?;
        self.create_author(&author)
    }

    /// Stores an already-built author and logs the outcome.
    pub fn create_author(&mut self, author: &Author) -> RepoResult<Author> {
        match self.repo.create_author(author) {
            Ok(stored) => {
                info!(
                    "event=author_add module=service status=ok author_id={}",
                    stored.id().unwrap_or_default()
                );
                Ok(stored)
            }
            Err(err) => {
                log_write_failure("author_add", &err);
                Err(err)
            }
        }
    }

    /// Writes changed fields of a stored author.
    ///
    /// Renaming onto an existing name fails with `DuplicateName` and leaves
    /// the row unchanged.
    pub fn update_author(&mut self, author: &Author) -> RepoResult<Author> {
        match self.repo.update_author(author) {
            Ok(stored) => {
                info!(
                    "event=author_update module=service status=ok author_id={}",
                    stored.id().unwrap_or_default()
                );
                Ok(stored)
            }
            Err(err) => {
                log_write_failure("author_update", &err);
                Err(err)
            }
        }
    }

    pub fn get_author(&self, id: RecordId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }
}
