//! `pt edit`: update fields on an existing project.
//!
//! The draft starts from the stored record; only flags that are given
//! change a field. Saving always bumps the last-updated time. Pass
//! `--next-action ""` to clear the next action.

use crate::cmd::show::{render_project, require_project_id};
use crate::output::{CliError, OutputMode, render_error};
use crate::validate;
use chrono::Utc;
use clap::Args;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::form::{Editor, ProjectDraft};
use tracing::info;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project ID to edit (supports unique prefixes).
    pub id: String,

    /// New project name.
    #[arg(long)]
    pub name: Option<String>,

    /// New client or startup name.
    #[arg(long)]
    pub client: Option<String>,

    /// New status: Audit, Optimisation, Scaling, Completed.
    #[arg(long)]
    pub status: Option<String>,

    /// New description.
    #[arg(short, long)]
    pub description: Option<String>,

    /// New current phase.
    #[arg(long)]
    pub phase: Option<String>,

    /// New key notes.
    #[arg(long)]
    pub notes: Option<String>,

    /// New next action (empty string clears it).
    #[arg(long)]
    pub next_action: Option<String>,
}

impl EditArgs {
    fn apply(&self, draft: &mut ProjectDraft, output: OutputMode) -> anyhow::Result<()> {
        let fields = [
            (&self.name, &mut draft.name),
            (&self.client, &mut draft.client_name),
            (&self.description, &mut draft.description),
            (&self.phase, &mut draft.phase),
            (&self.notes, &mut draft.notes),
            (&self.next_action, &mut draft.next_action),
        ];
        for (flag, slot) in fields {
            if let Some(value) = flag {
                slot.clone_from(value);
            }
        }

        if let Some(ref raw) = self.status {
            match validate::parse_status(raw) {
                Ok(status) => draft.status = status,
                Err(e) => {
                    render_error(output, &e.to_cli_error())?;
                    anyhow::bail!("{}", e.reason);
                }
            }
        }
        Ok(())
    }
}

/// Execute `pt edit <id>`.
///
/// # Errors
///
/// Returns an error if the ID does not resolve, a flag is invalid, the
/// edited draft leaves a required field blank, the store write fails, or
/// output rendering fails.
pub fn run_edit(args: &EditArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    let id = require_project_id(store.collection(), &args.id, output)?;

    let mut editor = Editor::default();
    editor.begin_edit(store.find(&id)?);
    if let Some(draft) = editor.draft_mut() {
        args.apply(draft, output)?;
    }

    let project = match editor.save(store.collection(), Utc::now(), &mut rand::thread_rng()) {
        Ok(Some(project)) => project,
        Ok(None) => anyhow::bail!("editor was not in edit mode"),
        Err(errors) => {
            render_error(output, &CliError::validation(&errors))?;
            anyhow::bail!("{} required field(s) missing", errors.len());
        }
    };

    store.upsert(project)?;
    info!(id = %id, "project updated");

    render_project(output, store.find(&id)?)
}
