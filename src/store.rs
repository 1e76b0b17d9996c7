//! Durable summary storage; the `url` primary key is the uniqueness guard.

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::record::SummaryRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summaries (
    url             TEXT PRIMARY KEY NOT NULL,
    title           TEXT NOT NULL,
    english_summary TEXT NOT NULL,
    urdu_summary    TEXT NOT NULL,
    created_at      TEXT NOT NULL
);
"#;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Exact-match lookup on the URL string.
    async fn lookup(&self, url: &str) -> Result<Option<SummaryRecord>>;

    /// Stores a new record; fails with `Conflict` if the URL is already present.
    ///
    /// When two requests for one URL both miss and both insert, the first row is
    /// kept and the other insert returns `Conflict`.
    async fn insert(&self, record: &SummaryRecord) -> Result<()>;

    async fn count(&self) -> Result<u64>;
}

/// SQLite-backed store.
#[derive(Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::StoreUnavailable(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }

        info!("Opening summary store at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::initialize(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory summary store");
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| AppError::StoreUnavailable(format!("Failed to acquire store lock: {}", e)))?;

            f(&conn)
        })
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("Store task failed: {}", e)))?
    }
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn lookup(&self, url: &str) -> Result<Option<SummaryRecord>> {
        let url = url.to_string();

        self.with_connection(move |conn| {
            let record = conn
                .query_row(
                    "SELECT url, title, english_summary, urdu_summary, created_at
                     FROM summaries WHERE url = ?1",
                    [&url],
                    |row| {
                        Ok(SummaryRecord {
                            url: row.get(0)?,
                            title: row.get(1)?,
                            english_summary: row.get(2)?,
                            urdu_summary: row.get(3)?,
                            created_at: row.get(4)?,
                        })
                    },
                )
                .optional()?;

            Ok(record)
        })
        .await
    }

    async fn insert(&self, record: &SummaryRecord) -> Result<()> {
        let record = record.clone();

        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO summaries (url, title, english_summary, urdu_summary, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.url,
                    record.title,
                    record.english_summary,
                    record.urdu_summary,
                    record.created_at,
                ],
            )
            .map_err(|e| insert_error(e, &record.url))?;

            Ok(())
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM summaries", [], |row| row.get(0))?;
            Ok(count.max(0) as u64)
        })
        .await
    }
}

fn insert_error(err: rusqlite::Error, url: &str) -> AppError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict { url: url.to_string() }
        }
        other => AppError::from(other),
    }
}
