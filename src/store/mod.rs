use std::{
    convert::TryFrom,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::oneshot;

mod migrations;
pub mod models;

use migrations::run_migrations;
pub use models::DailyBucket;

/// Durable home of per-day study totals.
///
/// Keys are calendar dates, rendered as `YYYY-MM-DD` on disk; the presence
/// timer is the sole writer of any given day's row.
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn get_seconds(&self, day: NaiveDate) -> Result<Option<u64>>;

    /// Upsert the day's total.
    async fn set_seconds(&self, day: NaiveDate, seconds: u64) -> Result<()>;

    async fn delete_day(&self, day: NaiveDate) -> Result<()>;

    /// All buckets, newest first.
    async fn list_days(&self) -> Result<Vec<DailyBucket>>;
}

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

fn date_key(day: NaiveDate) -> String {
    day.format(DATE_KEY_FORMAT).to_string()
}

fn parse_date_key(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
        .map_err(|err| anyhow!("invalid date key '{value}': {err}"))
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid datetime '{value}': {err}"))
}

fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

fn to_u64(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("value {value} is negative"))
}

type StoreTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum StoreCommand {
    Execute(StoreTask),
    Shutdown,
}

struct StoreInner {
    sender: mpsc::Sender<StoreCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(StoreCommand::Shutdown) {
                error!("Failed to send shutdown to store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join store thread: {join_err:?}");
            }
        }
    }
}

/// SQLite-backed bucket store.
///
/// A dedicated worker thread owns the connection; callers submit closures
/// over an mpsc channel and await the reply on a oneshot, so the async
/// tick loop never blocks on disk I/O.
#[derive(Clone)]
pub struct SqliteBucketStore {
    inner: Arc<StoreInner>,
    db_path: Arc<PathBuf>,
}

impl SqliteBucketStore {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<StoreCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("studywatch-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(
                            Err(anyhow::Error::new(err).context("failed to open SQLite database")),
                        );
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run database migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("Store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        StoreCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        StoreCommand::Shutdown => break,
                    }
                }

                info!("Store thread shutting down");
            })
            .with_context(|| "failed to spawn store worker thread")?;

        ready_rx
            .recv()
            .context("store worker exited before signaling readiness")??;

        info!("Bucket store initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(StoreInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = StoreCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Store caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("store thread terminated unexpectedly"))?
    }
}

#[async_trait]
impl BucketStore for SqliteBucketStore {
    async fn get_seconds(&self, day: NaiveDate) -> Result<Option<u64>> {
        let key = date_key(day);
        self.execute(move |conn| {
            let seconds = conn
                .query_row(
                    "SELECT study_seconds FROM daily_buckets WHERE date_key = ?1",
                    params![key],
                    |row| row.get::<_, i64>(0),
                )
                .optional()
                .with_context(|| "failed to read daily bucket")?;

            seconds.map(to_u64).transpose()
        })
        .await
    }

    async fn set_seconds(&self, day: NaiveDate, seconds: u64) -> Result<()> {
        let key = date_key(day);
        let updated_at = Utc::now().to_rfc3339();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO daily_buckets (date_key, study_seconds, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(date_key) DO UPDATE SET
                     study_seconds = excluded.study_seconds,
                     updated_at = excluded.updated_at",
                params![key, to_i64(seconds)?, updated_at],
            )
            .with_context(|| "failed to upsert daily bucket")?;
            Ok(())
        })
        .await
    }

    async fn delete_day(&self, day: NaiveDate) -> Result<()> {
        let key = date_key(day);
        self.execute(move |conn| {
            conn.execute("DELETE FROM daily_buckets WHERE date_key = ?1", params![key])
                .with_context(|| "failed to delete daily bucket")?;
            Ok(())
        })
        .await
    }

    async fn list_days(&self) -> Result<Vec<DailyBucket>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT date_key, study_seconds, updated_at
                 FROM daily_buckets
                 ORDER BY date_key DESC",
            )?;

            let mut rows = stmt.query([])?;
            let mut buckets = Vec::new();
            while let Some(row) = rows.next()? {
                buckets.push(DailyBucket {
                    day: parse_date_key(&row.get::<_, String>(0)?)?,
                    study_seconds: to_u64(row.get::<_, i64>(1)?)?,
                    updated_at: parse_datetime(&row.get::<_, String>(2)?)?,
                });
            }

            Ok(buckets)
        })
        .await
    }
}
