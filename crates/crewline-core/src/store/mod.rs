//! Durable draft persistence.
//!
//! The store keeps one JSON blob per draft id plus a bounded,
//! most-recent-first index under a fixed key, all on top of an abstract
//! [`KeyValue`] collaborator. Reads degrade to absence (a missing or
//! corrupt draft is never fatal); writes propagate their failures so
//! callers can tell persistence did not happen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use jiff::Timestamp;
use log::warn;

use crate::error::Result;
use crate::models::{DraftMeta, DraftRecord, DraftSnapshot};

pub mod autosave;
pub mod memory;
pub mod sqlite;

pub use autosave::AutosaveHandle;
pub use memory::MemoryKeyValue;
pub use sqlite::SqliteKeyValue;

/// Abstract durable key-value store the draft layer persists into.
pub trait KeyValue: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removes `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

const DRAFT_KEY_PREFIX: &str = "draft:";
const INDEX_KEY: &str = "drafts:index";

/// Maximum number of drafts retained before the oldest are evicted.
pub const MAX_DRAFTS: usize = 10;

static DRAFT_SEQ: AtomicU64 = AtomicU64::new(0);

fn draft_key(id: &str) -> String {
    format!("{DRAFT_KEY_PREFIX}{id}")
}

fn mint_draft_id() -> String {
    // Time-based uniqueness is sufficient for a single-user-per-device
    // store; the sequence disambiguates saves within one millisecond.
    let millis = Timestamp::now().as_millisecond();
    let seq = DRAFT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("draft-{millis}-{seq}")
}

/// Keyed storage of wizard drafts with a bounded recency index.
#[derive(Clone)]
pub struct DraftStore {
    kv: Arc<dyn KeyValue>,
}

impl DraftStore {
    /// Creates a store over any key-value backend.
    pub fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Opens a sqlite-backed store at the default XDG data path
    /// (`$XDG_DATA_HOME/crewline/drafts.db`).
    pub fn open_default() -> Result<Self> {
        let backend = SqliteKeyValue::open_default()?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Persists a snapshot, minting an id when none is given.
    ///
    /// Upserts the index entry for the id (in place when already listed,
    /// prepended otherwise) and evicts the oldest entries past
    /// [`MAX_DRAFTS`], deleting their records. Returns the id used.
    pub fn save(&self, snapshot: &DraftSnapshot, id: Option<&str>) -> Result<String> {
        let id = match id {
            Some(id) => id.to_string(),
            None => mint_draft_id(),
        };

        let record = DraftRecord {
            id: id.clone(),
            data: snapshot.data.clone(),
            last_modified: Timestamp::now(),
            current_step: snapshot.current_step,
            completed_steps: snapshot.completed_steps.clone(),
        };
        let blob = serde_json::to_string(&record)?;
        self.kv.set(&draft_key(&id), &blob)?;

        let mut index = self.read_index();
        let meta = DraftMeta {
            id: id.clone(),
            name: record.data.display_name().to_string(),
            last_modified: record.last_modified,
            current_step: record.current_step,
        };
        if let Some(existing) = index.iter_mut().find(|m| m.id == id) {
            *existing = meta;
        } else {
            index.insert(0, meta);
        }

        while index.len() > MAX_DRAFTS {
            if let Some(evicted) = index.pop() {
                self.kv.remove(&draft_key(&evicted.id))?;
            }
        }

        self.write_index(&index)?;
        Ok(id)
    }

    /// Loads a draft by id. Missing and corrupt drafts both read as
    /// absent; corruption is logged and otherwise ignored.
    pub fn load(&self, id: &str) -> Option<DraftRecord> {
        let blob = match self.kv.get(&draft_key(id)) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read draft {id}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&blob) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Discarding corrupt draft {id}: {e}");
                None
            }
        }
    }

    /// Lists draft index entries, most recently saved first. An unreadable
    /// index reads as empty.
    pub fn list(&self) -> Vec<DraftMeta> {
        self.read_index()
    }

    /// Removes a draft and its index entry. Deleting an id that does not
    /// exist succeeds; only storage failures surface.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.kv.remove(&draft_key(id))?;
        let mut index = self.read_index();
        let before = index.len();
        index.retain(|m| m.id != id);
        if index.len() != before {
            self.write_index(&index)?;
        }
        Ok(())
    }

    /// Removes every tracked draft along with the index itself.
    pub fn clear_all(&self) -> Result<()> {
        for meta in self.read_index() {
            self.kv.remove(&draft_key(&meta.id))?;
        }
        self.kv.remove(INDEX_KEY)
    }

    fn read_index(&self) -> Vec<DraftMeta> {
        let blob = match self.kv.get(INDEX_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read draft index: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(index) => index,
            Err(e) => {
                warn!("Discarding corrupt draft index: {e}");
                Vec::new()
            }
        }
    }

    fn write_index(&self, index: &[DraftMeta]) -> Result<()> {
        let blob = serde_json::to_string(index)?;
        self.kv.set(INDEX_KEY, &blob)
    }
}
