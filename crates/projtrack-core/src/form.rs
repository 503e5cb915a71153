//! Draft editing, required-field validation, and the editor state machine.
//!
//! A draft is free-form text until it is committed. Validation never raises;
//! it produces a [`FieldErrors`] map and an empty map is the only thing that
//! allows a save.

use crate::collection::Collection;
use crate::model::project::{Project, Status};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Required form fields, keyed by their persisted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    ClientName,
    Description,
    Phase,
    Notes,
}

impl Field {
    pub const REQUIRED: [Self; 5] = [
        Self::Name,
        Self::ClientName,
        Self::Description,
        Self::Phase,
        Self::Notes,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ClientName => "clientName",
            Self::Description => "description",
            Self::Phase => "phase",
            Self::Notes => "notes",
        }
    }

    /// Inline message shown when the field is blank.
    #[must_use]
    pub const fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Project name is required.",
            Self::ClientName => "Client/Startup name is required.",
            Self::Description => "Description is required.",
            Self::Phase => "Current phase is required.",
            Self::Notes => "Key notes are required.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Empty means the draft can be saved.
pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Editable form state for a project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub client_name: String,
    pub status: Status,
    pub description: String,
    pub phase: String,
    pub notes: String,
    pub next_action: String,
}

impl ProjectDraft {
    /// Prefill a draft from a stored record.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client_name: project.client_name.clone(),
            status: project.status,
            description: project.description.clone(),
            phase: project.phase.clone(),
            notes: project.notes.clone(),
            next_action: project.next_action.clone().unwrap_or_default(),
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::ClientName => &self.client_name,
            Field::Description => &self.description,
            Field::Phase => &self.phase,
            Field::Notes => &self.notes,
        }
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        validate(self).is_empty()
    }
}

/// Collect an error for every required field that is blank after trimming.
#[must_use]
pub fn validate(draft: &ProjectDraft) -> FieldErrors {
    Field::REQUIRED
        .into_iter()
        .filter(|field| draft.value(*field).trim().is_empty())
        .map(|field| (field, field.required_message()))
        .collect()
}

/// Derive a fresh project id from its name.
///
/// Shape is `p_<slug>_<6 hex>`: the slug is the lowercased name with
/// whitespace runs turned into `-` and anything outside `[a-z0-9-]` dropped.
pub fn slug_id<R: Rng>(name: &str, rng: &mut R) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }
    if slug.is_empty() {
        slug.push_str("project");
    }
    let suffix: u32 = rng.gen_range(0..0x100_0000);
    format!("p_{slug}_{suffix:06x}")
}

fn unused_slug_id<R: Rng>(name: &str, taken: &Collection, rng: &mut R) -> String {
    loop {
        let id = slug_id(name, rng);
        if taken.get(&id).is_none() {
            return id;
        }
        tracing::debug!(id = %id, "minted id already in use; drawing again");
    }
}

fn trimmed(s: &str) -> String {
    s.trim().to_string()
}

/// Turn a valid draft into a stored record.
///
/// Keeps `existing`'s id when editing, otherwise mints one with [`slug_id`]
/// that no record in `taken` already uses. Text is trimmed, `last_updated` is set to `now`, and a blank next action
/// is stored as absent.
pub fn commit<R: Rng>(
    draft: &ProjectDraft,
    existing: Option<&Project>,
    taken: &Collection,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Project, FieldErrors> {
    let errors = validate(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    let id = match existing {
        Some(p) => p.id.clone(),
        None => unused_slug_id(&draft.name, taken, rng),
    };
    let next_action = draft.next_action.trim();

    Ok(Project {
        id,
        name: trimmed(&draft.name),
        client_name: trimmed(&draft.client_name),
        status: draft.status,
        last_updated: now,
        description: trimmed(&draft.description),
        phase: trimmed(&draft.phase),
        notes: trimmed(&draft.notes),
        next_action: (!next_action.is_empty()).then(|| next_action.to_string()),
    })
}

/// Whether an editing session creates a record or edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(Box<Project>),
}

/// Editor state: viewing, or editing a draft.
///
/// `Viewing -> Editing` on create/edit, `Editing -> Viewing` on a successful
/// save or cancel. An invalid save leaves the editor where it was.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Editor {
    #[default]
    Viewing,
    Editing { mode: EditMode, draft: ProjectDraft },
}

impl Editor {
    pub fn begin_create(&mut self) {
        *self = Self::Editing {
            mode: EditMode::Create,
            draft: ProjectDraft::default(),
        };
    }

    pub fn begin_edit(&mut self, project: &Project) {
        *self = Self::Editing {
            draft: ProjectDraft::from_project(project),
            mode: EditMode::Edit(Box::new(project.clone())),
        };
    }

    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Mutable access to the draft while editing.
    pub fn draft_mut(&mut self) -> Option<&mut ProjectDraft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Viewing => None,
        }
    }

    /// Errors for the current draft; empty while viewing.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Editing { draft, .. } => validate(draft),
            Self::Viewing => FieldErrors::new(),
        }
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        matches!(self, Self::Editing { draft, .. } if draft.can_save())
    }

    /// Commit the draft.
    ///
    /// Returns `Ok(None)` while viewing. On success the editor returns to
    /// viewing and the saved project is handed back for upsert into `taken`.
    pub fn save<R: Rng>(
        &mut self,
        taken: &Collection,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Option<Project>, FieldErrors> {
        let Self::Editing { mode, draft } = self else {
            return Ok(None);
        };
        let existing = match mode {
            EditMode::Create => None,
            EditMode::Edit(project) => Some(&**project),
        };
        let project = commit(draft, existing, taken, now, rng)?;
        *self = Self::Viewing;
        Ok(Some(project))
    }
}
