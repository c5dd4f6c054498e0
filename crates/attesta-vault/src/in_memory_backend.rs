use attesta_core::{AttestaError, AttestaResult, RecordId, StorageBackend};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage backend: the reference local backend, and the one the
/// tests run against. Per-key operations are atomic under the mutex;
/// concurrent writers to the same record race last-write-wins, as the
/// protocol allows.
pub struct InMemoryBackend {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

fn lock_data(
    mutex: &Mutex<HashMap<String, Vec<u8>>>,
) -> AttestaResult<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
    mutex
        .lock()
        .map_err(|e| AttestaError::Storage(format!("lock poisoned: {}", e)))
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored records (for tests/inspection).
    pub fn count(&self) -> usize {
        lock_data(&self.data).map(|d| d.len()).unwrap_or(0)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, record_id: &RecordId) -> AttestaResult<Option<Vec<u8>>> {
        let data = lock_data(&self.data)?;
        Ok(data.get(record_id.as_str()).cloned())
    }

    fn put(&self, record_id: &RecordId, data: &[u8]) -> AttestaResult<()> {
        let mut store = lock_data(&self.data)?;
        store.insert(record_id.as_str().to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, record_id: &RecordId) -> AttestaResult<bool> {
        let mut data = lock_data(&self.data)?;
        Ok(data.remove(record_id.as_str()).is_some())
    }

    fn exists(&self, record_id: &RecordId) -> AttestaResult<bool> {
        let data = lock_data(&self.data)?;
        Ok(data.contains_key(record_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let backend = InMemoryBackend::new();
        let id = RecordId::new("test");

        assert!(backend.get(&id).unwrap().is_none());
        backend.put(&id, b"hello").unwrap();
        assert_eq!(backend.get(&id).unwrap().unwrap(), b"hello");
        assert!(backend.exists(&id).unwrap());
        assert!(backend.delete(&id).unwrap());
        assert!(!backend.exists(&id).unwrap());
    }

    #[test]
    fn test_absent_is_distinct_from_empty() {
        let backend = InMemoryBackend::new();
        let id = RecordId::new("empty");
        backend.put(&id, b"").unwrap();
        assert_eq!(backend.get(&id).unwrap(), Some(Vec::new()));
        assert!(backend.get(&RecordId::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_overwrite_last_write_wins() {
        let backend = InMemoryBackend::new();
        let id = RecordId::new("test");
        backend.put(&id, b"v1").unwrap();
        backend.put(&id, b"v2").unwrap();
        assert_eq!(backend.get(&id).unwrap().unwrap(), b"v2");
        assert_eq!(backend.count(), 1);
    }
}
