//! Record-store collaborator: real movements, persisted follow-ups, cases.

mod memory;
mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use crate::error::Result;
use crate::types::{Case, FollowUpRecord, MovementRecord, SyntheticFollowUp, Track};

pub trait RecordStore: Send + Sync {
    fn find_case(&self, id: i64) -> Result<Option<Case>>;

    /// Cases whose caption contains every word, case-insensitively.
    fn search_cases(&self, words: &[String], limit: usize) -> Result<Vec<Case>>;

    /// Real movements for a case from the track's collection, newest first.
    fn movements(&self, case_id: i64, track: Track, limit: usize) -> Result<Vec<MovementRecord>>;

    /// Persisted follow-ups for a case, newest first.
    fn follow_ups(&self, case_id: i64) -> Result<Vec<FollowUpRecord>>;

    /// Insert follow-ups, ignoring rows whose (case, date, type) already exists.
    fn insert_follow_ups(&self, entries: &[SyntheticFollowUp]) -> Result<()>;
}
