//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update and fetch rows of the `posts` table.
//!
//! # Invariants
//! - Writes call `Post::validate()` before any SQL.
//! - `posts.category` only ever receives `PostCategory::as_str()` literals.
//! - A write that fails inside its transaction is rolled back before the
//!   error is returned.

use super::schema::ensure_table_ready;
use super::{RepoError, RepoResult};
use crate::model::post::{Post, PostCategory};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const POST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "summary",
    "category",
    "created_at",
    "updated_at",
];

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    summary,
    category,
    created_at,
    updated_at
FROM posts";

/// Repository interface for post persistence.
pub trait PostRepository {
    fn create_post(&mut self, post: &Post) -> RepoResult<Post>;
    fn update_post(&mut self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: RecordId) -> RepoResult<Option<Post>>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "posts", POST_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&mut self, post: &Post) -> RepoResult<Post> {
        post.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match insert_post(&tx, post) {
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

    fn update_post(&mut self, post: &Post) -> RepoResult<Post> {
        post.validate()?;
        let id = post.id().ok_or(RepoError::Unsaved)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match write_post(&tx, id, post) {
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

    fn get_post(&self, id: RecordId) -> RepoResult<Option<Post>> {
        select_post(self.conn, id)
    }
}

fn insert_post(tx: &Transaction<'_>, post: &Post) -> RepoResult<Post> {
    let (id, created_at, updated_at) = tx.query_row(
        "INSERT INTO posts (title, content, summary, category)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, created_at, updated_at;",
        params![
            post.title(),
            post.content(),
            post.summary(),
            post.category().as_str(),
        ],
        |row| {
            Ok((
                row.get::<_, RecordId>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<i64>>(2)?,
            ))
        },
    )?;

    let mut stored = post.clone();
    stored.assign_store_fields(id, created_at, updated_at);
    Ok(stored)
}

fn write_post(tx: &Transaction<'_>, id: RecordId, post: &Post) -> RepoResult<Post> {
    let changed = tx.execute(
        "UPDATE posts
         SET
            title = ?1,
            content = ?2,
            summary = ?3,
            category = ?4
         WHERE id = ?5;",
        params![
            post.title(),
            post.content(),
            post.summary(),
            post.category().as_str(),
            id,
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }

    select_post(tx, id)?.ok_or(RepoError::NotFound(id))
}

fn select_post(conn: &Connection, id: RecordId) -> RepoResult<Option<Post>> {
    let mut stmt = conn.prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_post_row(row)?)),
        None => Ok(None),
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let category_text: String = row.get("category")?;
    let category = PostCategory::from_db(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts.category"
        ))
    })?;

    Ok(Post::from_store(
        row.get("id")?,
        row.get("title")?,
        row.get("content")?,
        row.get("summary")?,
        category,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}
