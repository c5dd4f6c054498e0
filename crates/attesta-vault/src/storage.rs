use attesta_core::{AttestaError, AttestaResult, RecordId, StorageBackend};
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// SQLite storage backend for durable holder-side persistence.
///
/// Stores only opaque record IDs and ciphertext blobs; the encrypted
/// envelopes are produced and consumed by the credential store, so the
/// database never sees plaintext key material or bundles.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open or create a database at the given path.
    pub fn open(path: &str) -> AttestaResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| AttestaError::Storage(format!("failed to open database: {}", e)))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                record_id TEXT PRIMARY KEY NOT NULL,
                data BLOB NOT NULL,
                updated_at TEXT DEFAULT (datetime('now'))
            );",
        )
        .map_err(|e| AttestaError::Storage(format!("failed to create tables: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database (for testing).
    pub fn in_memory() -> AttestaResult<Self> {
        Self::open(":memory:")
    }

    fn lock(&self) -> AttestaResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| AttestaError::Storage(format!("lock poisoned: {}", e)))
    }
}

impl StorageBackend for SqliteBackend {
    fn get(&self, record_id: &RecordId) -> AttestaResult<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let result: Result<Vec<u8>, _> = conn.query_row(
            "SELECT data FROM records WHERE record_id = ?1",
            params![record_id.as_str()],
            |row| row.get(0),
        );

        match result {
            Ok(data) => Ok(Some(data)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AttestaError::Storage(format!("query failed: {}", e))),
        }
    }

    fn put(&self, record_id: &RecordId, data: &[u8]) -> AttestaResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO records (record_id, data, updated_at)
             VALUES (?1, ?2, datetime('now'))",
            params![record_id.as_str(), data],
        )
        .map_err(|e| AttestaError::Storage(format!("insert failed: {}", e)))?;
        Ok(())
    }

    fn delete(&self, record_id: &RecordId) -> AttestaResult<bool> {
        let conn = self.lock()?;
        let rows = conn
            .execute(
                "DELETE FROM records WHERE record_id = ?1",
                params![record_id.as_str()],
            )
            .map_err(|e| AttestaError::Storage(format!("delete failed: {}", e)))?;
        Ok(rows > 0)
    }

    fn exists(&self, record_id: &RecordId) -> AttestaResult<bool> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM records WHERE record_id = ?1",
                params![record_id.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| AttestaError::Storage(format!("exists query failed: {}", e)))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CredentialStore;
    use attesta_core::{AuthType, KeyType, Property, Signature};

    fn test_backend() -> SqliteBackend {
        SqliteBackend::in_memory().unwrap()
    }

    #[test]
    fn test_get_nonexistent() {
        let backend = test_backend();
        assert!(backend.get(&RecordId::new("nope")).unwrap().is_none());
    }

    #[test]
    fn test_put_get_delete() {
        let backend = test_backend();
        let id = RecordId::new("record");

        backend.put(&id, b"envelope-bytes").unwrap();
        assert_eq!(backend.get(&id).unwrap().unwrap(), b"envelope-bytes");
        assert!(backend.exists(&id).unwrap());
        assert!(backend.delete(&id).unwrap());
        assert!(!backend.exists(&id).unwrap());
        assert!(!backend.delete(&id).unwrap());
    }

    #[test]
    fn test_put_overwrites() {
        let backend = test_backend();
        let id = RecordId::new("record");
        backend.put(&id, b"v1").unwrap();
        backend.put(&id, b"v2").unwrap();
        assert_eq!(backend.get(&id).unwrap().unwrap(), b"v2");
    }

    #[test]
    fn test_credential_store_over_sqlite() {
        let store = CredentialStore::new(test_backend());
        let properties = vec![Property::raw("name", "Kim")];
        let signature = Signature {
            auth_type: AuthType::Privacy,
            key_type: KeyType::Eddsa,
            value: "00".repeat(64),
        };

        store
            .store_credential("holder", &properties, &signature, Some("pw"))
            .unwrap();
        let bundle = store
            .load_credential("holder", Some("pw"))
            .unwrap()
            .unwrap();
        assert_eq!(bundle.properties, properties);
    }
}
