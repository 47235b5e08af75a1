use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

use crate::error::{Result, TallyError};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS income (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    amount REAL NOT NULL,
    date TEXT NOT NULL,
    is_recurring INTEGER DEFAULT 0,
    recurring_date TEXT,
    last_materialized TEXT
);

CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item TEXT NOT NULL,
    amount REAL NOT NULL,
    date TEXT NOT NULL,
    is_recurring INTEGER DEFAULT 0,
    recurring_date TEXT,
    last_materialized TEXT,
    purchase_id INTEGER REFERENCES planned_purchases(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS planned_purchases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item TEXT NOT NULL,
    amount REAL NOT NULL,
    purchased INTEGER DEFAULT 0,
    due_date TEXT
);

CREATE TABLE IF NOT EXISTS savings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount REAL NOT NULL,
    frequency TEXT NOT NULL,
    date TEXT NOT NULL
);
";

// Additive column migrations: (table, column, statement). Databases created
// before a column existed get it added in place; columns are never dropped
// or renamed.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "planned_purchases",
        "due_date",
        "ALTER TABLE planned_purchases ADD COLUMN due_date TEXT",
    ),
    (
        "income",
        "last_materialized",
        "ALTER TABLE income ADD COLUMN last_materialized TEXT",
    ),
    (
        "expenses",
        "last_materialized",
        "ALTER TABLE expenses ADD COLUMN last_materialized TEXT",
    ),
    (
        "expenses",
        "purchase_id",
        "ALTER TABLE expenses ADD COLUMN purchase_id INTEGER REFERENCES planned_purchases(id) ON DELETE SET NULL",
    ),
];

enum ConnState {
    Closed,
    Ready(Connection),
}

/// Owns the single database handle. Concurrent initializers serialize on the
/// inner mutex: whoever takes the lock first opens and migrates, everyone
/// else finds the connection ready. A failed open leaves the state closed so
/// a later call can retry.
pub struct Database {
    path: PathBuf,
    state: Mutex<ConnState>,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(ConnState::Closed),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the store and bring the schema up to date. Returns true when this
    /// call performed the open, false when the connection was already ready.
    pub fn initialize(&self) -> Result<bool> {
        let mut state = self.lock_state();
        ensure_open(&mut state, &self.path)
    }

    /// Run one store operation against the live connection, opening lazily
    /// if needed. Every read and write in the crate funnels through here.
    pub fn with_conn<T>(&self, op: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut state = self.lock_state();
        ensure_open(&mut state, &self.path)?;
        match &mut *state {
            ConnState::Ready(conn) => op(conn),
            ConnState::Closed => Err(TallyError::Init("connection unavailable".to_string())),
        }
    }

    /// Delete every row from all four tables.
    pub fn clear_all(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "DELETE FROM income;
                 DELETE FROM expenses;
                 DELETE FROM planned_purchases;
                 DELETE FROM savings;",
            )?;
            Ok(())
        })
    }

    /// Close the handle and delete the database file outright. The next
    /// operation starts over from an empty schema.
    pub fn reset(&self) -> Result<()> {
        let mut state = self.lock_state();
        *state = ConnState::Closed;
        for suffix in ["", "-wal", "-shm"] {
            let file = PathBuf::from(format!("{}{suffix}", self.path.display()));
            if file.exists() {
                std::fs::remove_file(file)?;
            }
        }
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, ConnState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_open(state: &mut ConnState, path: &Path) -> Result<bool> {
    match state {
        ConnState::Ready(_) => Ok(false),
        ConnState::Closed => {
            let conn =
                open_and_migrate(path).map_err(|e| TallyError::Init(e.to_string()))?;
            *state = ConnState::Ready(conn);
            Ok(true)
        }
    }
}

fn open_and_migrate(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;",
    )?;
    conn.execute_batch(SCHEMA)?;
    for (table, column, statement) in MIGRATIONS {
        if !has_column(&conn, table, column)? {
            conn.execute(statement, [])?;
        }
    }
    Ok(conn)
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
