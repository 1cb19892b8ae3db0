//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    fn column_names(db: &Database, table: &str) -> Vec<String> {
        let mut stmt = db
            .connection
            .prepare("SELECT name FROM pragma_table_info(?1)")
            .unwrap();
        stmt.query_map([table], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_fresh_schema_has_every_project_column() {
        let db = Database::in_memory().unwrap();
        assert_eq!(
            column_names(&db, "projects"),
            [
                "id",
                "client_id",
                "title",
                "description",
                "address",
                "status",
                "created_at",
                "updated_at"
            ]
        );
    }

    #[test]
    fn test_schema_initialization_is_idempotent() {
        let db = Database::in_memory().unwrap();
        db.initialize_schema().unwrap();
        assert_eq!(column_names(&db, "tasks").len(), 8);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::in_memory().unwrap();
        let enabled: i64 = db
            .connection
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
