//! SQLite-backed snapshot store for durable local persistence.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::snapshot::SnapshotStore;

/// Snapshot store persisting to a local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Open (creating if missing) the database at `path` and ensure the
    /// snapshots table exists.
    pub async fn connect(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create snapshot directory at {parent:?}")
                })?;
            }
        }

        let db_url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&db_url)
            .await
            .with_context(|| format!("failed to open snapshot database at {path:?}"))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key      TEXT NOT NULL PRIMARY KEY,
                data     TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create snapshots table")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT data
            FROM snapshots
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch snapshot")?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let data: String = row.try_get("data")?;
        Ok(Some(data))
    }

    async fn put(&self, key: &str, payload: &str) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, data, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                data = excluded.data,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("failed to upsert snapshot")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CART_SNAPSHOT_KEY;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteSnapshotStore::connect(dir.path().join("cart.db"))
            .await
            .unwrap();

        assert_eq!(store.get(CART_SNAPSHOT_KEY).await.unwrap(), None);

        store.put(CART_SNAPSHOT_KEY, r#"{"version":1}"#).await.unwrap();
        assert_eq!(
            store.get(CART_SNAPSHOT_KEY).await.unwrap().as_deref(),
            Some(r#"{"version":1}"#)
        );
    }

    #[tokio::test]
    async fn put_overwrites_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteSnapshotStore::connect(dir.path().join("cart.db"))
            .await
            .unwrap();

        store.put(CART_SNAPSHOT_KEY, "first").await.unwrap();
        store.put(CART_SNAPSHOT_KEY, "second").await.unwrap();

        assert_eq!(
            store.get(CART_SNAPSHOT_KEY).await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn snapshots_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");

        {
            let store = SqliteSnapshotStore::connect(&path).await.unwrap();
            store.put(CART_SNAPSHOT_KEY, "durable").await.unwrap();
        }

        let reopened = SqliteSnapshotStore::connect(&path).await.unwrap();
        assert_eq!(
            reopened.get(CART_SNAPSHOT_KEY).await.unwrap().as_deref(),
            Some("durable")
        );
    }
}
