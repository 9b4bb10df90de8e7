use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::{Store, MIGRATION_001_INITIAL};

/// Key-value store backed by a single SQLite table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// List every stored key, sorted.
    #[cfg(test)]
    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list keys")?;

        Ok(rows.iter().map(|row| row.get("key")).collect())
    }
}

impl Store for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read key '{}'", key))?;

        Ok(row.map(|row| row.get("value")))
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        for (key, value) in entries {
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?, ?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                "#,
            )
            .bind(*key)
            .bind(value)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to write key '{}'", key))?;
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn temp_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.db");
        let url = format!("sqlite:{}?mode=rwc", path.display());
        let store = SqliteStore::init(&url).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _dir) = temp_store().await;
        assert_eq!(store.get("expenses").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let (store, _dir) = temp_store().await;
        store.set("walletBalance", "100".into()).await.unwrap();
        store.set("walletBalance", "250".into()).await.unwrap();

        assert_eq!(
            store.get("walletBalance").await.unwrap(),
            Some("250".to_string())
        );
        assert_eq!(store.keys().await.unwrap(), vec!["walletBalance"]);
    }

    #[tokio::test]
    async fn test_set_many_writes_all_keys() {
        let (store, _dir) = temp_store().await;
        store
            .set_many(&[("a", "1".into()), ("b", "2".into())])
            .await
            .unwrap();

        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.get("b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let (store, _dir) = temp_store().await;
        store.set("totalBalance", "500000".into()).await.unwrap();
        store.migrate().await.unwrap();
        assert_eq!(
            store.get("totalBalance").await.unwrap(),
            Some("500000".to_string())
        );
    }
}
