//! `pt show`: display full details of a single project.
//!
//! Supports partial ID resolution: "aurora" → "p_aurora_001" when the prefix
//! is unique.

use crate::output::{
    CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render_error, render_mode,
};
use crate::validate;
use clap::Args;
use projtrack_core::collection::Collection;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::error::TrackerError;
use projtrack_core::model::project::Project;
use projtrack_core::view::format_date;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project ID to display. Supports unique prefixes: "aurora" → "p_aurora_001".
    pub id: String,
}

/// Outcome of resolving a user-supplied project ID.
#[derive(Debug, PartialEq, Eq)]
pub enum IdResolution {
    Found(String),
    Ambiguous(Vec<String>),
    NotFound,
}

/// Resolve a (possibly partial) project ID against `collection`.
///
/// Resolution order:
/// 1. Exact match
/// 2. `p_{input}` exactly
/// 3. Unique prefix match on the ID, with or without the `p_` prefix
pub fn resolve_project_id(collection: &Collection, input: &str) -> IdResolution {
    let input = input.trim();

    if collection.get(input).is_some() {
        return IdResolution::Found(input.to_string());
    }

    let prefixed = format!("p_{input}");
    if collection.get(&prefixed).is_some() {
        return IdResolution::Found(prefixed);
    }

    let mut candidates: Vec<String> = collection
        .iter()
        .filter(|p| p.id.starts_with(input) || p.id.starts_with(&prefixed))
        .map(|p| p.id.clone())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => IdResolution::NotFound,
        1 => IdResolution::Found(candidates.remove(0)),
        _ => IdResolution::Ambiguous(candidates),
    }
}

/// Validate and resolve `input`, rendering the error view on failure.
pub fn require_project_id(
    collection: &Collection,
    input: &str,
    output: OutputMode,
) -> anyhow::Result<String> {
    if let Err(e) = validate::validate_project_id(input) {
        render_error(output, &e.to_cli_error())?;
        anyhow::bail!("{}", e.reason);
    }

    match resolve_project_id(collection, input) {
        IdResolution::Found(id) => Ok(id),
        IdResolution::Ambiguous(ids) => {
            render_error(
                output,
                &CliError::with_details(
                    format!("project ID '{input}' is ambiguous"),
                    format!("use a longer prefix; candidates: {}", ids.join(", ")),
                    "ambiguous_project_id",
                ),
            )?;
            anyhow::bail!("project ID '{input}' is ambiguous");
        }
        IdResolution::NotFound => {
            let err = TrackerError::NotFound {
                id: input.to_string(),
            };
            render_not_found(output, &err)?;
            Err(err.into())
        }
    }
}

/// The "not found" view: the project does not exist, go back to the list.
pub fn render_not_found(output: OutputMode, err: &TrackerError) -> anyhow::Result<()> {
    let mut cli = CliError::from(err);
    cli.message = format!("{err}: this project does not exist (or was removed)");
    cli.suggestion = Some("back to projects: run `pt list`".to_string());
    render_error(output, &cli)
}

/// Execute `pt show <id>`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the ID does not resolve,
/// or output rendering fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let id = require_project_id(store.collection(), &args.id, output)?;
    let project = store.find(&id)?;
    render_project(output, project)
}

/// Render one project in the requested mode.
pub fn render_project(output: OutputMode, project: &Project) -> anyhow::Result<()> {
    render_mode(
        output,
        project,
        |p, w| render_show_text(p, w),
        |p, w| render_show_human(p, w),
    )
}

/// Render full project details in human-readable format.
pub fn render_show_human(project: &Project, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Project {}", project.id))?;
    writeln!(w, "{}", project.name)?;
    pretty_rule(w)?;
    pretty_kv(w, "status", project.status.as_str())?;
    pretty_kv(w, "client", &project.client_name)?;
    pretty_kv(w, "updated", format_date(project.last_updated))?;

    writeln!(w)?;
    pretty_section(w, "Description")?;
    for line in project.description.lines() {
        writeln!(w, "{line}")?;
    }

    writeln!(w)?;
    pretty_section(w, "Current phase")?;
    writeln!(w, "{}", project.phase)?;

    writeln!(w)?;
    pretty_section(w, "Key notes")?;
    for line in project.notes.lines() {
        writeln!(w, "{line}")?;
    }

    if let Some(ref next) = project.next_action {
        writeln!(w)?;
        pretty_section(w, "Next action")?;
        writeln!(w, "{next}")?;
    }
    Ok(())
}

fn render_show_text(project: &Project, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id:          {}", project.id)?;
    writeln!(w, "name:        {}", project.name)?;
    writeln!(w, "client:      {}", project.client_name)?;
    writeln!(w, "status:      {}", project.status)?;
    writeln!(w, "updated:     {}", project.last_updated.to_rfc3339())?;
    writeln!(w, "phase:       {}", project.phase)?;
    if let Some(ref next) = project.next_action {
        writeln!(w, "next_action: {next}")?;
    }
    writeln!(w, "description: {}", project.description.replace('\n', " "))?;
    writeln!(w, "notes:       {}", project.notes.replace('\n', " "))?;
    Ok(())
}
