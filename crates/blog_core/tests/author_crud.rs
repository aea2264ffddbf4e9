use blog_core::db::migrations::latest_version;
use blog_core::db::open_db_in_memory;
use blog_core::{
    add_author, Author, AuthorRepository, AuthorService, RepoError, SqliteAuthorRepository,
    ValidationError,
};
use rusqlite::Connection;

#[test]
fn add_author_stores_record_with_store_fields() {
    let mut conn = open_db_in_memory().unwrap();

    let stored = add_author(&mut conn, "Ada Lovelace", "0123456789").unwrap();
    let id = stored.id().unwrap();
    assert!(stored.created_at().is_some());
    assert_eq!(stored.updated_at(), None);

    let repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    let loaded = repo.get_author(id).unwrap().unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(loaded.phone_number(), "0123456789");
}

#[test]
fn add_author_twice_with_same_name_keeps_one_row() {
    let mut conn = open_db_in_memory().unwrap();

    add_author(&mut conn, "Ada", "1234567890").unwrap();
    let err = add_author(&mut conn, "Ada", "0987654321").unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Ada"));

    assert_eq!(author_count(&conn), 1);
    let phone: String = conn
        .query_row("SELECT phone_number FROM authors WHERE name = 'Ada';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(phone, "1234567890");

    // The rolled-back attempt must not leave the connection inside a transaction.
    assert!(conn.is_autocommit());
    add_author(&mut conn, "Grace", "0987654321").unwrap();
    assert_eq!(author_count(&conn), 2);
}

#[test]
fn add_author_validation_failure_never_touches_store() {
    let mut conn = open_db_in_memory().unwrap();

    for (name, phone) in [
        ("", "1234567890"),
        ("Ada", "123-456-7890"),
        ("Ada", "12345"),
        ("Ada", "123456789a"),
    ] {
        let err = add_author(&mut conn, name, phone).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "{name}/{phone}");
    }
    assert_eq!(author_count(&conn), 0);
}

#[test]
fn add_author_formats_numeric_phone_numbers() {
    let mut conn = open_db_in_memory().unwrap();

    let stored = add_author(&mut conn, "Ada", 5_551_234_567_u64).unwrap();
    assert_eq!(stored.phone_number(), "5551234567");
}

#[test]
fn update_author_refreshes_updated_at() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    let mut service = AuthorService::new(repo);

    let mut author = service.add_author("Ada", "1234567890").unwrap();
    author.set_phone_number("0987654321").unwrap();
    let updated = service.update_author(&author).unwrap();

    assert_eq!(updated.phone_number(), "0987654321");
    assert_eq!(updated.created_at(), author.created_at());
    assert!(updated.updated_at().unwrap() >= updated.created_at().unwrap());
}

#[test]
fn unchanged_author_update_leaves_updated_at_empty() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();

    let stored = repo
        .create_author(&Author::new("Ada", "1234567890").unwrap())
        .unwrap();
    let rewritten = repo.update_author(&stored).unwrap();

    assert_eq!(rewritten.updated_at(), None);
    assert_eq!(rewritten, stored);
}

#[test]
fn update_author_onto_existing_name_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    let mut service = AuthorService::new(repo);

    service.add_author("Ada", "1234567890").unwrap();
    let mut grace = service.add_author("Grace", "0987654321").unwrap();
    grace.set_name("Ada").unwrap();

    let err = service.update_author(&grace).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(_)));

    let reloaded = service.get_author(grace.id().unwrap()).unwrap().unwrap();
    assert_eq!(reloaded.name(), "Grace");
    assert_eq!(reloaded.updated_at(), None);
}

#[test]
fn update_requires_a_stored_author() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();

    let unsaved = Author::new("Ada", "1234567890").unwrap();
    assert!(matches!(
        repo.update_author(&unsaved).unwrap_err(),
        RepoError::Unsaved
    ));

    let stored = repo.create_author(&unsaved).unwrap();
    let mut json = serde_json::to_value(&stored).unwrap();
    json["id"] = serde_json::json!(stored.id().unwrap() + 100);
    let missing: Author = serde_json::from_value(json).unwrap();
    assert!(matches!(
        repo.update_author(&missing).unwrap_err(),
        RepoError::NotFound(id) if id == stored.id().unwrap() + 100
    ));
}

#[test]
fn legacy_rows_load_but_cannot_be_written_back() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Legacy', '555');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    let mut repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    let legacy = repo.get_author(id).unwrap().unwrap();
    assert_eq!(legacy.phone_number(), "555");

    let err = repo.update_author(&legacy).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidPhoneNumber)
    ));
}

#[test]
fn get_missing_author_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&mut conn).unwrap();
    assert!(repo.get_author(42).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    match SqliteAuthorRepository::try_new(&mut conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE authors (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            phone_number TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAuthorRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "authors",
            column: "created_at"
        })
    ));
}

fn author_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap()
}
