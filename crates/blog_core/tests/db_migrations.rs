use blog_core::db::migrations::latest_version;
use blog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_blog_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "authors");
    assert_table_exists(&conn, "posts");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO authors (name, phone_number) VALUES ('Ada', '1234567890');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let authors: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(authors, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn author_name_column_is_unique_and_required() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Ada', '1234567890');",
        [],
    )
    .unwrap();

    let duplicate = DbError::from(
        conn.execute(
            "INSERT INTO authors (name, phone_number) VALUES ('Ada', '0987654321');",
            [],
        )
        .unwrap_err(),
    );
    assert!(duplicate.is_unique_violation());

    let missing = DbError::from(
        conn.execute(
            "INSERT INTO authors (name, phone_number) VALUES (NULL, '0987654321');",
            [],
        )
        .unwrap_err(),
    );
    assert!(!missing.is_unique_violation());
}

#[test]
fn store_assigns_created_at_and_leaves_updated_at_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO posts (title, content, summary, category)
         VALUES ('Guess', 'body', 'sum', 'Fiction');",
        [],
    )
    .unwrap();

    let (created_at, updated_at): (i64, Option<i64>) = conn
        .query_row("SELECT created_at, updated_at FROM posts;", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert!(created_at > 0);
    assert_eq!(updated_at, None);

    conn.execute("UPDATE posts SET summary = 'changed';", [])
        .unwrap();
    let updated_at: Option<i64> = conn
        .query_row("SELECT updated_at FROM posts;", [], |row| row.get(0))
        .unwrap();
    assert!(updated_at.unwrap() >= created_at);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
