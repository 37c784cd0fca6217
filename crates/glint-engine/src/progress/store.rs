use std::collections::HashSet;

use crate::core::clock::Clock;
use crate::progress::backend::ProgressBackend;
use crate::progress::record::{ProgressRecord, STORAGE_KEY};

/// Outcome of a `mark_found` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkFound {
    /// First discovery of this id.
    Newly {
        /// Progress count after the insert.
        progress: u32,
        /// True exactly when this insert completed the set.
        completed_now: bool,
    },
    /// The id was already recorded, or is not in the catalog; nothing
    /// changed.
    AlreadyFound,
}

/// Exclusive owner of the persisted [`ProgressRecord`].
///
/// All mutation funnels through `mark_found` and `reset`; every other
/// component only reads derived values. Each successful mutation synchronously
/// re-persists the full record. Storage failures are logged and swallowed:
/// the in-memory record stays the source of truth for the session.
pub struct ProgressStore {
    record: ProgressRecord,
    /// The catalog's id set, injected at construction. Its cardinality is
    /// the authoritative total; nothing here hard-codes the number.
    ids: HashSet<String>,
    total: u32,
    backend: Box<dyn ProgressBackend>,
    clock: Box<dyn Clock>,
}

impl ProgressStore {
    /// Hydrate a store from the backend, failing soft to the empty record.
    pub fn new(
        ids: impl IntoIterator<Item = String>,
        backend: Box<dyn ProgressBackend>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let ids: HashSet<String> = ids.into_iter().collect();
        let total = ids.len() as u32;
        let record = match backend.load(STORAGE_KEY) {
            Ok(Some(payload)) => ProgressRecord::from_json_lossy(&payload),
            Ok(None) => ProgressRecord::default(),
            Err(err) => {
                log::warn!("progress storage unreadable, starting empty: {err}");
                ProgressRecord::default()
            }
        };
        let mut store = Self {
            record,
            ids,
            total,
            backend,
            clock,
        };
        store.normalize();
        store
    }

    /// Reconcile a hydrated record with the live catalog: drop persisted ids
    /// the catalog no longer declares, then re-derive the completion stamp so
    /// that `completed()` holds exactly when every current marker is found.
    fn normalize(&mut self) {
        let before = self.record.found.len();
        let ids = &self.ids;
        self.record.found.retain(|id, _| ids.contains(id));
        let dropped = before - self.record.found.len();
        if dropped > 0 {
            log::warn!("dropping {dropped} persisted id(s) absent from the catalog");
        }
        let found = self.record.found.len() as u32;
        let mut changed = dropped > 0;
        if self.record.completed_at.is_some() && found < self.total {
            log::warn!(
                "persisted completion no longer holds ({found}/{}), clearing stamp",
                self.total
            );
            self.record.completed_at = None;
            changed = true;
        } else if self.record.completed_at.is_none() && self.total > 0 && found == self.total {
            // The catalog shrank to exactly the found set.
            self.record.completed_at = Some(self.clock.now_iso());
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    /// True iff `id` has been discovered.
    pub fn is_found(&self, id: &str) -> bool {
        self.record.found.contains_key(id)
    }

    /// Record a discovery. Idempotent: a second call for the same id is a
    /// no-op. The completion stamp is written in the same mutation that
    /// inserts the final id.
    pub fn mark_found(&mut self, id: &str) -> MarkFound {
        if !self.ids.contains(id) {
            log::warn!("mark_found ignored: id {id:?} not in catalog");
            return MarkFound::AlreadyFound;
        }
        if self.record.found.contains_key(id) {
            return MarkFound::AlreadyFound;
        }
        let now = self.clock.now_iso();
        self.record.found.insert(id.to_owned(), now.clone());
        let progress = self.record.found.len() as u32;
        let completed_now = progress == self.total && self.record.completed_at.is_none();
        if completed_now {
            self.record.completed_at = Some(now);
        }
        self.persist();
        MarkFound::Newly {
            progress,
            completed_now,
        }
    }

    /// Number of discovered markers.
    pub fn progress(&self) -> u32 {
        self.record.found.len() as u32
    }

    /// Whether every marker has been found.
    pub fn completed(&self) -> bool {
        self.record.completed_at.is_some()
    }

    /// Timestamp of completion, if completed.
    pub fn completed_at(&self) -> Option<&str> {
        self.record.completed_at.as_deref()
    }

    /// Discovery timestamp for `id`, if found.
    pub fn found_at(&self, id: &str) -> Option<&str> {
        self.record.found.get(id).map(String::as_str)
    }

    /// Clear all progress. The engine facade only routes this through in
    /// debug mode; it is never reachable by an end user.
    pub fn reset(&mut self) {
        self.record = ProgressRecord::default();
        if let Err(err) = self.backend.clear(STORAGE_KEY) {
            log::warn!("progress storage clear failed: {err}");
        }
    }

    fn persist(&mut self) {
        let payload = match self.record.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("progress record serialize failed: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.save(STORAGE_KEY, &payload) {
            log::warn!("progress storage write failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::progress::backend::MemoryBackend;

    fn clock() -> Box<FixedClock> {
        Box::new(FixedClock("2026-03-01T12:00:00.000Z".into()))
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    fn store(catalog: &[&str]) -> ProgressStore {
        ProgressStore::new(ids(catalog), Box::new(MemoryBackend::new()), clock())
    }

    #[test]
    fn fresh_session_scenario() {
        let mut store = store(&["a", "b", "c"]);
        assert_eq!(store.progress(), 0);
        assert!(!store.completed());

        assert_eq!(
            store.mark_found("a"),
            MarkFound::Newly {
                progress: 1,
                completed_now: false
            }
        );
        assert!(!store.completed());

        store.mark_found("b");
        assert_eq!(store.progress(), 2);

        assert_eq!(
            store.mark_found("c"),
            MarkFound::Newly {
                progress: 3,
                completed_now: true
            }
        );
        assert!(store.completed());
        assert_eq!(store.completed_at(), Some("2026-03-01T12:00:00.000Z"));
    }

    #[test]
    fn mark_found_is_idempotent() {
        let mut store = store(&["a", "b", "c"]);
        store.mark_found("a");
        assert_eq!(store.mark_found("a"), MarkFound::AlreadyFound);
        assert_eq!(store.progress(), 1);
    }

    #[test]
    fn completion_stamp_is_written_once() {
        let mut store = store(&["a"]);
        assert_eq!(
            store.mark_found("a"),
            MarkFound::Newly {
                progress: 1,
                completed_now: true
            }
        );
        // Duplicate never reports completion again.
        assert_eq!(store.mark_found("a"), MarkFound::AlreadyFound);
        assert!(store.completed());
    }

    #[test]
    fn round_trip_persistence() {
        let backend = MemoryBackend::new();
        {
            let mut store =
                ProgressStore::new(ids(&["a", "b", "c"]), Box::new(backend.clone()), clock());
            store.mark_found("a");
        }
        // Simulated reload: fresh store, same storage.
        let store = ProgressStore::new(ids(&["a", "b", "c"]), Box::new(backend), clock());
        assert_eq!(store.progress(), 1);
        assert!(store.is_found("a"));
        assert!(!store.is_found("b"));
        assert!(!store.completed());
    }

    #[test]
    fn corrupt_persisted_state_recovers_empty() {
        let backend = MemoryBackend::new();
        backend.seed(STORAGE_KEY, "###corrupt###");
        let store = ProgressStore::new(ids(&["a", "b", "c"]), Box::new(backend), clock());
        assert_eq!(store.progress(), 0);
    }

    #[test]
    fn write_failure_keeps_memory_authoritative() {
        let mut store =
            ProgressStore::new(ids(&["a", "b", "c"]), Box::new(MemoryBackend::failing()), clock());
        store.mark_found("a");
        assert_eq!(store.progress(), 1);
        assert!(store.is_found("a"));
    }

    #[test]
    fn reset_clears_record_and_storage() {
        let backend = MemoryBackend::new();
        let mut store = ProgressStore::new(ids(&["a"]), Box::new(backend.clone()), clock());
        store.mark_found("a");
        assert!(store.completed());
        store.reset();
        assert_eq!(store.progress(), 0);
        assert!(!store.completed());
        assert_eq!(backend.raw(STORAGE_KEY), None);
    }

    #[test]
    fn stale_completion_stamp_is_dropped_when_catalog_grows() {
        let backend = MemoryBackend::new();
        backend.seed(
            STORAGE_KEY,
            r#"{"found":{"a":"2026-01-01T00:00:00Z"},"completedAt":"2026-01-01T00:00:00Z"}"#,
        );
        // Catalog now has 2 markers; the old record claims completion with 1.
        let store = ProgressStore::new(ids(&["a", "b"]), Box::new(backend), clock());
        assert_eq!(store.progress(), 1);
        assert!(!store.completed());
    }

    #[test]
    fn stale_ids_from_an_older_catalog_never_count() {
        let backend = MemoryBackend::new();
        backend.seed(
            STORAGE_KEY,
            r#"{"found":{"old-marker":"2026-01-01T00:00:00Z"}}"#,
        );
        let mut store = ProgressStore::new(ids(&["a", "b"]), Box::new(backend.clone()), clock());
        assert_eq!(store.progress(), 0);
        assert!(!store.is_found("old-marker"));

        store.mark_found("a");
        assert!(!store.completed(), "one of two markers must not complete");
        store.mark_found("b");
        assert_eq!(store.progress(), 2);
        assert!(store.completed());
        // The dropped id never comes back through persistence either.
        assert!(!backend.raw(STORAGE_KEY).unwrap().contains("old-marker"));
    }

    #[test]
    fn unknown_id_is_rejected() {
        let mut store = store(&["a"]);
        assert_eq!(store.mark_found("zzz"), MarkFound::AlreadyFound);
        assert_eq!(store.progress(), 0);
        assert!(!store.completed());
    }

    #[test]
    fn catalog_shrinking_to_the_found_set_stamps_completion() {
        let backend = MemoryBackend::new();
        backend.seed(
            STORAGE_KEY,
            concat!(
                r#"{"found":{"a":"2026-01-01T00:00:00Z","b":"2026-01-01T00:00:00Z","#,
                r#""old-marker":"2026-01-01T00:00:00Z"}}"#
            ),
        );
        let store = ProgressStore::new(ids(&["a", "b"]), Box::new(backend), clock());
        assert_eq!(store.progress(), 2);
        assert!(store.completed());
    }

    #[test]
    fn persists_after_every_mutation() {
        let backend = MemoryBackend::new();
        let mut store = ProgressStore::new(ids(&["a", "b", "c"]), Box::new(backend.clone()), clock());
        store.mark_found("a");
        let payload = backend.raw(STORAGE_KEY).unwrap();
        assert!(payload.contains("\"a\""));
    }
}
