//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update and fetch rows of the `authors` table.
//! - Surface `authors.name` uniqueness violations as `DuplicateName`.
//!
//! # Invariants
//! - Writes call `Author::validate()` before any SQL.
//! - A write that fails inside its transaction is rolled back before the
//!   error is returned.

use super::schema::ensure_table_ready;
use super::{RepoError, RepoResult};
use crate::db::DbError;
use crate::model::author::Author;
use crate::model::RecordId;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const AUTHOR_COLUMNS: &[&str] = &["id", "name", "phone_number", "created_at", "updated_at"];

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Repository interface for author persistence.
pub trait AuthorRepository {
    /// Inserts `author` and returns the stored copy with store-owned fields.
    fn create_author(&mut self, author: &Author) -> RepoResult<Author>;
    /// Writes `author`'s fields to its existing row and returns the refreshed row.
    fn update_author(&mut self, author: &Author) -> RepoResult<Author>;
    /// Gets one author by id.
    fn get_author(&self, id: RecordId) -> RepoResult<Option<Author>>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "authors", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&mut self, author: &Author) -> RepoResult<Author> {
        author.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match insert_author(&tx, author) {
            Ok(stored) => {
                tx.commit()?;
                Ok(stored)
            }
            Err(err) => {
                tx.rollback()?;
                Err(err)
            }
        }
    }

    fn update_author(&mut self, author: &Author) -> RepoResult<Author> {
        author.validate()?;
        let id = author.id().ok_or(RepoError::Unsaved)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match write_author(&tx, id, author) {
            Ok(stored) => {
                tx.commit()?;
                Ok(stored)
            }
            Err(err) => {
                tx.rollback()?;
                Err(err)
            }
        }
    }

    fn get_author(&self, id: RecordId) -> RepoResult<Option<Author>> {
        select_author(self.conn, id)
    }
}

fn insert_author(tx: &Transaction<'_>, author: &Author) -> RepoResult<Author> {
    let (id, created_at, updated_at) = tx
        .query_row(
            "INSERT INTO authors (name, phone_number)
             VALUES (?1, ?2)
             RETURNING id, created_at, updated_at;",
            params![author.name(), author.phone_number()],
            |row| {
                Ok((
                    row.get::<_, RecordId>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            },
        )
        .map_err(|err| map_write_error(err, author.name()))?;

    let mut stored = author.clone();
    stored.assign_store_fields(id, created_at, updated_at);
    Ok(stored)
}

fn write_author(tx: &Transaction<'_>, id: RecordId, author: &Author) -> RepoResult<Author> {
    let changed = tx
        .execute(
            "UPDATE authors
             SET
                name = ?1,
                phone_number = ?2
             WHERE id = ?3;",
            params![author.name(), author.phone_number(), id],
        )
        .map_err(|err| map_write_error(err, author.name()))?;

    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }

    select_author(tx, id)?.ok_or(RepoError::NotFound(id))
}

fn select_author(conn: &Connection, id: RecordId) -> RepoResult<Option<Author>> {
    let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
    let author = stmt.query_row([id], parse_author_row).optional()?;
    Ok(author)
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author::from_store(
        row.get("id")?,
        row.get("name")?,
        row.get("phone_number")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}

fn map_write_error(err: rusqlite::Error, name: &str) -> RepoError {
    let err = DbError::Sqlite(err);
    if err.is_unique_violation() {
        RepoError::DuplicateName(name.to_string())
    } else {
        RepoError::Db(err)
    }
}
