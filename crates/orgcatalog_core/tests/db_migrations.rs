use orgcatalog_core::db::migrations::latest_version;
use orgcatalog_core::db::{open_configured, open_db, open_db_in_memory, DbError};
use orgcatalog_core::{CatalogConfig, CatalogError, RepoError, SqliteOrganizationRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "buildings");
    assert_table_exists(&conn, "activities");
    assert_table_exists(&conn, "organizations");
    assert_table_exists(&conn, "organization_activities");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orgcatalog.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    conn_first
        .execute(
            "INSERT INTO buildings (address, latitude, longitude) VALUES ('Main st, 1', 1.0, 2.0);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM buildings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_configured_uses_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.db");

    let conn = open_configured(&CatalogConfig::with_database_file(&path)).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    drop(conn);
    assert!(path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteOrganizationRepository::try_new(&conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(err, RepoError::UninitializedConnection { .. }));
    assert!(matches!(CatalogError::from(err), CatalogError::Storage(_)));
}

#[test]
fn fold_contains_matches_case_insensitively() {
    let conn = open_db_in_memory().unwrap();

    let matched: bool = conn
        .query_row("SELECT fold_contains('Школа №1', 'школа');", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert!(matched);

    let null_haystack: bool = conn
        .query_row("SELECT fold_contains(NULL, 'a');", [], |row| row.get(0))
        .unwrap();
    assert!(!null_haystack);
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
