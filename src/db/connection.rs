// Database connection management
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::migrations::run_migrations;

/// Shared handle to the dashboard's SQLite database.
///
/// The handle is injected into every query operation; cloning shares the
/// underlying connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (creating if necessary) the database file and set up the schema.
    pub fn new(db_path: PathBuf) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an ephemeral in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.db");

        let db = Database::new(path.clone()).unwrap();
        assert!(path.exists());

        // Schema is in place: the seeded tables are queryable.
        let conn = db.connection();
        let conn = conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM invoices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_clone_shares_connection() {
        let db = Database::open_in_memory().unwrap();
        let clone = db.clone();

        {
            let conn = db.connection();
            let conn = conn.lock().unwrap();
            conn.execute(
                "INSERT INTO revenue (month, revenue) VALUES ('Jan', 2000)",
                [],
            )
            .unwrap();
        }

        let conn = clone.connection();
        let conn = conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM revenue", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
