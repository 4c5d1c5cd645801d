//! SQLite persistence for endpoints and their request log.
//!
//! A single connection is opened at startup and shared by cloning [`Store`].
//! Every operation is one statement, compiled once through the connection's
//! statement cache and reused afterwards.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::Result;
use crate::models::{Endpoint, RequestLogEntry};

const INSERT_ENDPOINT: &str = "INSERT INTO endpoints (key, response, created_by_sha)
     VALUES (?1, ?2, ?3)
     RETURNING id, created_at";

const INSERT_REQUEST: &str = "INSERT INTO requests (key, request_sha, metadata)
     VALUES (?1, ?2, ?3)
     RETURNING id, created_at";

// highest id wins when a key was registered more than once
const SELECT_CURRENT_ENDPOINT: &str = "SELECT id, key, response, created_at, created_by_sha
     FROM endpoints
     WHERE key = ?1
     ORDER BY id DESC
     LIMIT 1";

const SELECT_REQUESTS: &str = "SELECT id, key, created_at, request_sha, metadata
     FROM requests
     WHERE key = ?1
     ORDER BY created_at DESC, id DESC
     LIMIT ?2 OFFSET ?3";

const SELECT_REQUESTS_BY_SHA: &str = "SELECT id, key, created_at, request_sha, metadata
     FROM requests
     WHERE key = ?1 AND request_sha = ?2
     ORDER BY created_at DESC, id DESC
     LIMIT ?3 OFFSET ?4";

/// Create tables and indexes if they are missing. Never drops or alters
/// existing data, so it is safe to run on every startup.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS endpoints (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            key TEXT NOT NULL,
            created_by_sha TEXT NOT NULL,
            response BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            key TEXT NOT NULL,
            request_sha TEXT NOT NULL,
            metadata TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_endpoints_key ON endpoints(key);
        CREATE INDEX IF NOT EXISTS idx_requests_key ON requests(key);
        CREATE INDEX IF NOT EXISTS idx_requests_key_sha ON requests(key, request_sha);
        "#,
    )
}

/// Shared handle to the embedded database.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(path = %path.as_ref().display(), journal_mode = %mode, "database opened");
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn insert_endpoint(&self, key: &str, response: &[u8], creator_sha: &str) -> Result<Endpoint> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(INSERT_ENDPOINT)?;
        let (id, created_at) = stmt.query_row(params![key, response, creator_sha], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        Ok(Endpoint {
            id,
            key: key.to_string(),
            response: response.to_vec(),
            created_at,
            created_by_sha: creator_sha.to_string(),
        })
    }

    pub fn insert_log_entry(
        &self,
        key: &str,
        requester_sha: &str,
        metadata: &str,
    ) -> Result<RequestLogEntry> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(INSERT_REQUEST)?;
        let (id, created_at) = stmt.query_row(params![key, requester_sha, metadata], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        Ok(RequestLogEntry {
            id,
            key: key.to_string(),
            created_at,
            request_sha: requester_sha.to_string(),
            metadata: metadata.to_string(),
        })
    }

    /// Most recently inserted endpoint for `key`, if any.
    pub fn current_endpoint(&self, key: &str) -> Result<Option<Endpoint>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(SELECT_CURRENT_ENDPOINT)?;
        let endpoint = stmt
            .query_row(params![key], |row| {
                Ok(Endpoint {
                    id: row.get(0)?,
                    key: row.get(1)?,
                    response: row.get(2)?,
                    created_at: row.get(3)?,
                    created_by_sha: row.get(4)?,
                })
            })
            .optional()?;
        Ok(endpoint)
    }

    /// Log entries for `key`, newest first. No match is an empty vec, not an error.
    pub fn list_log_entries(
        &self,
        key: &str,
        limit: u32,
        offset: u32,
        sha_filter: Option<&str>,
    ) -> Result<Vec<RequestLogEntry>> {
        let conn = self.conn.lock();
        let rows = match sha_filter {
            Some(sha) => {
                let mut stmt = conn.prepare_cached(SELECT_REQUESTS_BY_SHA)?;
                let rows = stmt
                    .query_map(params![key, sha, limit, offset], log_entry_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare_cached(SELECT_REQUESTS)?;
                let rows = stmt
                    .query_map(params![key, limit, offset], log_entry_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(rows)
    }
}

fn log_entry_from_row(row: &Row<'_>) -> rusqlite::Result<RequestLogEntry> {
    Ok(RequestLogEntry {
        id: row.get(0)?,
        key: row.get(1)?,
        created_at: row.get(2)?,
        request_sha: row.get(3)?,
        metadata: row.get(4)?,
    })
}
