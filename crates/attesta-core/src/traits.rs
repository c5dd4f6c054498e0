use crate::error::AttestaResult;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// StorageBackend — pluggable key-value persistence
//
// The backend stores opaque bytes under namespaced record IDs; it never sees
// plaintext credentials or key material. Per-key operations are assumed
// atomic, but there are no multi-key transactions: concurrent writers to the
// same record race last-write-wins, and callers needing stricter consistency
// serialize access per identifier themselves.
// ---------------------------------------------------------------------------

pub trait StorageBackend: Send + Sync {
    /// `Ok(None)` means the record was never written — distinct from an
    /// empty value.
    fn get(&self, record_id: &RecordId) -> AttestaResult<Option<Vec<u8>>>;
    fn put(&self, record_id: &RecordId, data: &[u8]) -> AttestaResult<()>;
    fn delete(&self, record_id: &RecordId) -> AttestaResult<bool>;
    fn exists(&self, record_id: &RecordId) -> AttestaResult<bool>;
}
