use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "school.db";

pub const SEED_USERNAME: &str = "admin";
pub const SEED_PASSWORD: &str = "admin";

/// The one database handle of the process. Built once at startup and lent to
/// `auth` and `students` by reference.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Store> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.to_string_lossy())
                })?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.to_string_lossy()))?;
        let store = Store {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.bootstrap()?;
        Ok(store)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Store> {
        let store = Store {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.bootstrap()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Creates both tables if missing and seeds the admin credential once.
    /// Runs in autocommit mode: every statement is durable when it returns.
    pub fn bootstrap(&self) -> anyhow::Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                student_class TEXT NOT NULL
            )",
            [],
        )?;

        // An existing admin row keeps whatever password it has.
        let seeded: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE username = ?",
                [SEED_USERNAME],
                |r| r.get(0),
            )
            .optional()?;
        if seeded.is_none() {
            self.conn.execute(
                "INSERT INTO users (username, password) VALUES (?, ?)",
                (SEED_USERNAME, SEED_PASSWORD),
            )?;
            tracing::info!(username = SEED_USERNAME, "seeded default credential");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_users(store: &Store) -> i64 {
        store
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .expect("count users")
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let store = Store::open_in_memory().expect("open store");
        for _ in 0..5 {
            store.bootstrap().expect("bootstrap again");
        }
        assert_eq!(count_users(&store), 1);

        let (username, password): (String, String) = store
            .conn()
            .query_row("SELECT username, password FROM users", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .expect("seed row");
        assert_eq!(username, "admin");
        assert_eq!(password, "admin");
    }

    #[test]
    fn bootstrap_keeps_existing_admin_password() {
        let store = Store::open_in_memory().expect("open store");
        store
            .conn()
            .execute("UPDATE users SET password = 'changed' WHERE username = 'admin'", [])
            .expect("update admin");
        store.bootstrap().expect("bootstrap again");

        let password: String = store
            .conn()
            .query_row(
                "SELECT password FROM users WHERE username = 'admin'",
                [],
                |r| r.get(0),
            )
            .expect("admin row");
        assert_eq!(password, "changed");
        assert_eq!(count_users(&store), 1);
    }

    #[test]
    fn bootstrap_creates_students_table_empty() {
        let store = Store::open_in_memory().expect("open store");
        let n: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .expect("count students");
        assert_eq!(n, 0);
        assert!(store.path().is_none());
    }
}
