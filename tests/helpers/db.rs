use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tempfile::NamedTempFile;

/// Test database with automatic cleanup
pub struct TestDb {
    connection: DatabaseConnection,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        // Create temporary SQLite database file
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_str().expect("Invalid temp file path");
        let db_url = format!("sqlite://{}?mode=rwc", db_path);

        // Connect to database
        let connection = Database::connect(&db_url)
            .await
            .expect("Failed to connect to test database");

        // Run migrations (also seeds the permission type reference set)
        migration::Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations");

        Self {
            connection,
            _temp_file: temp_file,
        }
    }

    /// Get database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

/// Create a permission record for testing
pub async fn seed_permission(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    type_code: i32,
    permission_date: i64,
) -> furlough::storage::Permission {
    let inserted = furlough::storage::create_permission(
        db,
        &furlough::storage::NewPermission {
            employee_first_name: first_name.to_string(),
            employee_last_name: last_name.to_string(),
            type_code,
            permission_date,
        },
    )
    .await
    .expect("Failed to create test permission");

    furlough::storage::get_permission(db, inserted.id)
        .await
        .expect("Failed to read back test permission")
        .expect("Test permission missing after insert")
}
