//! Per-namespace encrypted credential records, persisted through the
//! shared connection pool.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::params;

use shelflife_core::errors::{ShelfError, ShelfResult};
use shelflife_core::models::UpstreamCredentials;
use shelflife_core::traits::ISecretStore;
use shelflife_storage::{migrations, storage_err, ConnectionPool};

use crate::cipher::SecretCipher;
use crate::key::MasterKey;

/// Encrypted credential store. At most one live record per namespace;
/// saves are upserts (last write wins).
pub struct SecretStore {
    pool: Arc<ConnectionPool>,
    cipher: SecretCipher,
}

impl SecretStore {
    /// Build a store over an existing pool. Runs migrations so the store
    /// works standalone as well as alongside a `HistoryStore`.
    pub fn new(pool: Arc<ConnectionPool>, master_key: &MasterKey) -> ShelfResult<Self> {
        pool.writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))?;
        Ok(Self {
            pool,
            cipher: SecretCipher::new(master_key),
        })
    }
}

impl ISecretStore for SecretStore {
    fn save(&self, namespace: &str, endpoint_url: &str, token: &str) -> ShelfResult<()> {
        if endpoint_url.trim().is_empty() || token.trim().is_empty() {
            return Err(ShelfError::validation(
                "endpoint URL and token cannot be empty",
            ));
        }

        let credentials = UpstreamCredentials {
            endpoint_url: endpoint_url.to_string(),
            token: token.to_string(),
        };
        let plaintext = serde_json::to_vec(&credentials).map_err(|e| {
            ShelfError::validation(format!("credential serialization failed: {e}"))
        })?;
        let payload = self.cipher.seal(&plaintext)?;

        self.pool.writer.with_conn_sync(|conn| {
            conn.execute(
                "INSERT INTO upstream_secrets (namespace, endpoint_url, payload, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(namespace) DO UPDATE SET
                     endpoint_url = excluded.endpoint_url,
                     payload = excluded.payload,
                     updated_at = excluded.updated_at",
                params![namespace, endpoint_url, payload, Utc::now().to_rfc3339()],
            )
            .map_err(storage_err)?;
            Ok(())
        })?;

        tracing::debug!(namespace, "credentials saved");
        Ok(())
    }

    fn load(&self, namespace: &str) -> ShelfResult<UpstreamCredentials> {
        let payload: Vec<u8> = self.pool.with_reader(|conn| {
            conn.query_row(
                "SELECT payload FROM upstream_secrets WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => ShelfError::SecretNotFound {
                    namespace: namespace.to_string(),
                },
                other => storage_err(other),
            })
        })?;

        let plaintext = self.cipher.open(&payload).inspect_err(|_| {
            tracing::warn!(namespace, "credential payload failed authentication");
        })?;
        serde_json::from_slice(&plaintext).map_err(|e| ShelfError::Decryption {
            reason: format!("decrypted envelope is not valid JSON: {e}"),
        })
    }

    fn exists(&self, namespace: &str) -> ShelfResult<bool> {
        let count: i64 = self.pool.with_reader(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM upstream_secrets WHERE namespace = ?1",
                params![namespace],
                |row| row.get(0),
            )
            .map_err(storage_err)
        })?;
        Ok(count > 0)
    }

    fn delete(&self, namespace: &str) -> ShelfResult<usize> {
        self.pool.writer.with_conn_sync(|conn| {
            conn.execute(
                "DELETE FROM upstream_secrets WHERE namespace = ?1",
                params![namespace],
            )
            .map_err(storage_err)
        })
    }
}
