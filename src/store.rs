//! Record Persistence
//!
//! Defines the storage interface for pairing records and its SQLite
//! implementation. Entity shape stays decoupled from storage mechanics:
//! handlers only ever see the `RecordStore` trait.

use crate::signs::Sign;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::task;

/// One persisted submission. `sign_a <= sign_b` under the canonical
/// name order; rows are append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub sign_a: Sign,
    pub sign_b: Sign,
    pub duration_days: i64,
}

/// Storage interface for pairing records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists one canonicalized pair and returns its assigned id.
    /// A failed insert leaves no partial row.
    async fn insert(&self, sign_a: Sign, sign_b: Sign, duration_days: i64) -> Result<i64>;

    /// All stored records, ordered by id.
    async fn list_all(&self) -> Result<Vec<Record>>;
}

/// SQLite-backed store. Opens a connection per operation on the blocking
/// pool; a single INSERT is atomic, which covers the all-or-nothing
/// requirement for submissions.
#[derive(Clone)]
pub struct SqliteRecordStore {
    db_path: PathBuf,
}

impl SqliteRecordStore {
    /// Opens (or creates) the database file and ensures the table exists.
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let path_clone = path.clone();

        task::spawn_blocking(move || {
            let conn = Connection::open(&path_clone)?;

            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS relacoes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    signo1 TEXT NOT NULL,
                    signo2 TEXT NOT NULL,
                    duracao_dias INTEGER NOT NULL
                );
                "#,
                [],
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(Self { db_path: path })
    }
}

fn sign_from_column(name: String) -> Result<Sign> {
    Sign::from_name(&name).ok_or_else(|| anyhow!("unknown sign name in stored row: {name:?}"))
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn insert(&self, sign_a: Sign, sign_b: Sign, duration_days: i64) -> Result<i64> {
        let path = self.db_path.clone();

        task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            conn.execute(
                "INSERT INTO relacoes (signo1, signo2, duracao_dias) VALUES (?1, ?2, ?3)",
                params![sign_a.as_str(), sign_b.as_str(), duration_days],
            )?;
            Ok::<_, anyhow::Error>(conn.last_insert_rowid())
        })
        .await?
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        let path = self.db_path.clone();

        task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            let mut stmt = conn.prepare(
                "SELECT id, signo1, signo2, duracao_dias FROM relacoes ORDER BY id ASC",
            )?;

            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?;

            let mut records = Vec::new();
            for row in rows {
                let (id, signo1, signo2, duracao_dias) = row?;
                records.push(Record {
                    id,
                    sign_a: sign_from_column(signo1)?,
                    sign_b: sign_from_column(signo2)?,
                    duration_days: duracao_dias,
                });
            }
            Ok::<_, anyhow::Error>(records)
        })
        .await?
    }
}
