use sea_orm::DatabaseConnection;
use tempfile::NamedTempFile;

/// Migrated database backed by a temporary file.
///
/// The file handle must outlive the connection, so both are returned.
pub async fn setup_test_db() -> (DatabaseConnection, NamedTempFile) {
    let temp_file = NamedTempFile::new().expect("Failed to create temp database file");
    let url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = super::establish_connection(&url)
        .await
        .expect("Failed to connect to test database");

    super::setup_database(&db)
        .await
        .expect("Failed to run migrations");

    (db, temp_file)
}
