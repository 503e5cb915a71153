//! Single owner of the live collection.
//!
//! [`ProjectStore`] is the one place that holds the current [`Collection`].
//! Every state change, including the initial load, is written through the
//! [`Repository`] before the new version is adopted.

use crate::collection::Collection;
use crate::error::{Result, TrackerError};
use crate::model::project::Project;
use crate::storage::{BlobStore, Repository};
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct ProjectStore<S> {
    repository: Repository<S>,
    current: Collection,
}

impl<S: BlobStore> ProjectStore<S> {
    /// Load from `repository` (or `fallback`) and persist the result.
    pub fn open(repository: Repository<S>, fallback: Collection) -> Result<Self> {
        let current = repository.load(fallback);
        repository.save(&current)?;
        debug!(count = current.len(), "project store opened");
        Ok(Self {
            repository,
            current,
        })
    }

    /// The current collection version.
    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.current
    }

    /// Look up a project by id.
    pub fn find(&self, id: &str) -> Result<&Project> {
        self.current.get(id).ok_or_else(|| TrackerError::NotFound { id: id.to_string() })
    }

    /// Insert or replace `project`, then persist.
    ///
    /// If the save fails the current collection is left as it was.
    #[instrument(skip_all, fields(id = %project.id))]
    pub fn upsert(&mut self, project: Project) -> Result<&Collection> {
        let next = self.current.upsert(project);
        self.repository.save(&next)?;
        info!(count = next.len(), version = next.version(), "collection updated");
        self.current = next;
        Ok(&self.current)
    }

    pub const fn repository(&self) -> &Repository<S> {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectStore;
    use crate::collection::Collection;
    use crate::error::{Result, TrackerError};
    use crate::model::project::{Project, Status};
    use crate::seed::{AURORA_ID, seed_collection};
    use crate::storage::{BlobStore, DEFAULT_STORAGE_KEY, MemoryStore, Repository};
    use chrono::Utc;
    use std::cell::Cell;
    use std::io;

    fn new_project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: "New".to_string(),
            client_name: "Client".to_string(),
            status: Status::Audit,
            last_updated: Utc::now(),
            description: "d".to_string(),
            phase: "p".to_string(),
            notes: "n".to_string(),
            next_action: None,
        }
    }

    /// Accepts a fixed number of writes, then fails.
    struct QuotaStore {
        inner: MemoryStore,
        writes_left: Cell<u32>,
    }

    impl BlobStore for QuotaStore {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            let left = self.writes_left.get();
            if left == 0 {
                return Err(TrackerError::Io {
                    path: key.into(),
                    source: io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"),
                });
            }
            self.writes_left.set(left - 1);
            self.inner.set(key, value)
        }
    }

    #[test]
    fn open_persists_initial_load() {
        let mem = MemoryStore::new();
        let store = ProjectStore::open(Repository::new(&mem), seed_collection(Utc::now()))
            .expect("open");
        assert_eq!(store.collection().len(), 4);
        assert!(mem.raw(DEFAULT_STORAGE_KEY).is_some());
    }

    #[test]
    fn upsert_persists_every_change() {
        let mem = MemoryStore::new();
        let mut store = ProjectStore::open(Repository::new(&mem), seed_collection(Utc::now()))
            .expect("open");
        store.upsert(new_project("p_new_1")).expect("upsert");

        let reloaded = Repository::new(&mem).load(Collection::default());
        assert_eq!(reloaded.len(), 5);
        assert_eq!(reloaded.as_slice()[0].id, "p_new_1");
    }

    #[test]
    fn find_reports_not_found() {
        let store = ProjectStore::open(
            Repository::new(MemoryStore::new()),
            seed_collection(Utc::now()),
        )
        .expect("open");
        assert_eq!(store.find(AURORA_ID).map(|p| p.status).ok(), Some(Status::Audit));
        assert!(matches!(
            store.find("p_nope"),
            Err(TrackerError::NotFound { id }) if id == "p_nope"
        ));
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let quota = QuotaStore {
            inner: MemoryStore::new(),
            writes_left: Cell::new(1),
        };
        let mut store =
            ProjectStore::open(Repository::new(&quota), seed_collection(Utc::now())).expect("open");
        let before = store.collection().clone();

        let err = store.upsert(new_project("p_new_2")).expect_err("quota");
        assert!(matches!(err, TrackerError::Io { .. }));
        assert_eq!(store.collection(), &before);
        assert!(store.find("p_new_2").is_err());
    }
}
