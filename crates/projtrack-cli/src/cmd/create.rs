//! `pt create`: add a new project.

use crate::cmd::show::render_project;
use crate::output::{CliError, OutputMode, render_error};
use crate::validate;
use chrono::Utc;
use clap::Args;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::form::{Editor, ProjectDraft};
use tracing::info;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Client or startup name.
    #[arg(long, default_value = "")]
    pub client: String,

    /// Current status: Audit, Optimisation, Scaling, Completed.
    #[arg(long)]
    pub status: Option<String>,

    /// What the project is about.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Current phase, e.g. "Discovery + Audit".
    #[arg(long, default_value = "")]
    pub phase: String,

    /// Key notes: context, decisions, risks, links.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Optional next action.
    #[arg(long)]
    pub next_action: Option<String>,
}

impl CreateArgs {
    /// Fill a blank draft from the flags. Status stays at the form default
    /// unless given.
    fn fill(&self, draft: &mut ProjectDraft, output: OutputMode) -> anyhow::Result<()> {
        draft.name.clone_from(&self.name);
        draft.client_name.clone_from(&self.client);
        draft.description.clone_from(&self.description);
        draft.phase.clone_from(&self.phase);
        draft.notes.clone_from(&self.notes);
        draft.next_action = self.next_action.clone().unwrap_or_default();
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

/// Execute `pt create`.
///
/// # Errors
///
/// Returns an error if a flag is invalid, a required field is blank, the
/// store cannot be opened or written, or output rendering fails.
pub fn run_create(args: &CreateArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let mut editor = Editor::default();
    editor.begin_create();
    if let Some(draft) = editor.draft_mut() {
        args.fill(draft, output)?;
    }

    let mut store = super::open_store(config)?;
    let project = match editor.save(store.collection(), Utc::now(), &mut rand::thread_rng()) {
        Ok(Some(project)) => project,
        Ok(None) => anyhow::bail!("editor was not in create mode"),
        Err(errors) => {
            render_error(output, &CliError::validation(&errors))?;
            anyhow::bail!("{} required field(s) missing", errors.len());
        }
    };

    let id = project.id.clone();
    store.upsert(project)?;
    info!(id = %id, "project created");

    render_project(output, store.find(&id)?)
}
