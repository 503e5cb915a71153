//! Immutable, versioned collection of projects.
//!
//! Every mutation returns a new [`Collection`]; earlier versions stay valid so
//! a caller can compare versions to detect change.

use crate::model::project::Project;
use std::sync::Arc;

/// Ordered set of projects, unique by `id`.
///
/// Order is insertion order and carries no meaning for display; views sort
/// by recency.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collection {
    projects: Arc<[Project]>,
    version: u64,
}

impl Collection {
    /// Build a collection from records, keeping the first occurrence of any
    /// duplicated id.
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        let mut unique: Vec<Project> = Vec::with_capacity(projects.len());
        for project in projects {
            if unique.iter().any(|p| p.id == project.id) {
                tracing::debug!(id = %project.id, "dropping duplicate project id");
                continue;
            }
            unique.push(project);
        }
        Self {
            projects: unique.into(),
            version: 0,
        }
    }

    /// Insert or replace by id.
    ///
    /// A known id is replaced at its current position; an unknown id is
    /// inserted at the front. `self` is left untouched.
    #[must_use]
    pub fn upsert(&self, project: Project) -> Self {
        let mut next: Vec<Project> = Vec::with_capacity(self.projects.len() + 1);
        match self.position(&project.id) {
            Some(idx) => {
                next.extend_from_slice(&self.projects);
                next[idx] = project;
            }
            None => {
                next.push(project);
                next.extend_from_slice(&self.projects);
            }
        }
        Self {
            projects: next.into(),
            version: self.version + 1,
        }
    }

    /// Index of the project with `id`, if present.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    /// Mutation counter; bumped by every [`upsert`](Self::upsert).
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// True when both collections share the same backing records.
    #[must_use]
    pub fn same_records(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.projects, &other.projects)
    }
}

impl From<Vec<Project>> for Collection {
    fn from(projects: Vec<Project>) -> Self {
        Self::new(projects)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;
    use crate::model::project::{Project, Status};
    use chrono::{TimeZone, Utc};

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            client_name: "Client".to_string(),
            status: Status::Audit,
            last_updated: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            description: "d".to_string(),
            phase: "p".to_string(),
            notes: "n".to_string(),
            next_action: None,
        }
    }

    #[test]
    fn upsert_unknown_id_prepends() {
        let base = Collection::new(vec![project("a", "A"), project("b", "B")]);
        let next = base.upsert(project("c", "C"));

        assert_eq!(next.len(), 3);
        assert_eq!(next.as_slice()[0].id, "c");
        assert_eq!(next.version(), base.version() + 1);
        assert_eq!(base.len(), 2, "previous version must be untouched");
    }

    #[test]
    fn upsert_known_id_replaces_in_place() {
        let base = Collection::new(vec![project("a", "A"), project("b", "B"), project("c", "C")]);
        let next = base.upsert(project("b", "B2"));

        assert_eq!(next.len(), 3);
        assert_eq!(next.position("b"), Some(1));
        assert_eq!(next.get("b").map(|p| p.name.as_str()), Some("B2"));
        assert_eq!(base.get("b").map(|p| p.name.as_str()), Some("B"));
    }

    #[test]
    fn new_drops_duplicate_ids() {
        let c = Collection::new(vec![project("a", "first"), project("a", "second")]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.as_slice()[0].name, "first");
    }

    #[test]
    fn clone_shares_records_but_upsert_does_not() {
        let base = Collection::new(vec![project("a", "A")]);
        let copy = base.clone();
        assert!(base.same_records(&copy));
        assert!(!base.same_records(&base.upsert(project("a", "A2"))));
    }

    #[test]
    fn empty_collection_upsert() {
        let empty = Collection::default();
        assert!(empty.is_empty());
        let next = empty.upsert(project("x", "X"));
        assert_eq!(next.len(), 1);
        assert!(next.get("x").is_some());
        assert!(next.get("y").is_none());
    }
}
