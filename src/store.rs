use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;

use crate::assembler;
use crate::iso_639::ISO639;
use crate::record::EventRecord;

const SHARDS: usize = 16;

struct Entry {
    modified: SystemTime,
    language: ISO639,
    record: Arc<EventRecord>,
}

impl Entry {
    #[inline(always)]
    fn is_fresh(&self, modified: SystemTime, language: ISO639) -> bool {
        self.modified == modified && self.language == language
    }
}

/// Decoded records keyed by source path (or any caller key).
///
/// An entry is reused only while the caller reports the same
/// modification time and asks for the same target language; otherwise
/// the record is decoded again and replaces it. Parsing runs outside the
/// shard lock.
pub struct RecordStore {
    shards: Vec<Mutex<HashMap<String, Entry>>>,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        RecordStore {
            shards: (0..SHARDS).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    #[inline(always)]
    fn shard(&self, key: &str) -> &Mutex<HashMap<String, Entry>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARDS]
    }

    pub fn lookup(
        &self,
        key: &str,
        modified: SystemTime,
        target_language: &str,
    ) -> Option<Arc<EventRecord>> {
        let language = ISO639::target(target_language);

        self.shard(key)
            .lock()
            .get(key)
            .filter(|entry| entry.is_fresh(modified, language))
            .map(|entry| Arc::clone(&entry.record))
    }

    /// Cached record for `key` when still fresh, else decode `buf` and
    /// cache the result.
    pub fn parse(
        &self,
        buf: &[u8],
        key: &str,
        modified: SystemTime,
        target_language: &str,
    ) -> Arc<EventRecord> {
        if let Some(record) = self.lookup(key, modified, target_language) {
            log::debug!("(store) hit {}", key);
            return record;
        }

        log::debug!("(store) miss {}", key);

        let record = Arc::new(assembler::parse(buf, target_language));

        self.shard(key).lock().insert(
            key.to_string(),
            Entry {
                modified,
                language: ISO639::target(target_language),
                record: Arc::clone(&record),
            },
        );

        record
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.lock().is_empty())
    }

    pub fn clear(&self) {
        for s in self.shards.iter() {
            s.lock().clear();
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        RecordStore::new()
    }
}
