use crate::logger;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TOKEN_KEY: &str = "token";

/// Access to the session token. Only login and logout write it; everything
/// else just reads it before an authenticated call.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Token persisted in the local SQLite database so it survives restarts.
pub struct SqliteTokenStore {
    conn: Mutex<Connection>,
}

impl SqliteTokenStore {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        Ok(Self::from_connection(super::open_db(path)?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> rusqlite::Result<T> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&conn)
    }
}

impl TokenStore for SqliteTokenStore {
    fn token(&self) -> Option<String> {
        let result = self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?", [TOKEN_KEY], |row| row.get(0))
                .optional()
        });
        match result {
            Ok(token) => token,
            Err(e) => {
                logger::log(&format!("Failed to read session token: {}", e));
                None
            }
        }
    }

    fn set_token(&self, token: &str) {
        let result = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                rusqlite::params![TOKEN_KEY, token, now()],
            )
        });
        if let Err(e) = result {
            logger::log(&format!("Failed to store session token: {}", e));
        }
    }

    fn clear(&self) {
        let result = self.with_conn(|conn| conn.execute("DELETE FROM kv WHERE key = ?", [TOKEN_KEY]));
        if let Err(e) = result {
            logger::log(&format!("Failed to clear session token: {}", e));
        }
    }
}

/// Process-local token, for tests and for running without a database.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn set_token(&self, token: &str) {
        *self.token.lock().unwrap_or_else(|p| p.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }
}
