//! `pt list`: search and list projects, most recently updated first.

use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};
use chrono::{DateTime, Utc};
use clap::Args;
use projtrack_core::collection::Collection;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::model::project::Status;
use projtrack_core::view::{clamp_summary, format_date, search, sort_by_recency};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Search name, client, or status (case-insensitive substring).
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    pub query: Option<String>,

    /// Maximum projects to show.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// One row of the list view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub id: String,
    pub name: String,
    pub client_name: String,
    pub status: Status,
    pub last_updated: DateTime<Utc>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
}

/// JSON envelope for `pt list`.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub items: Vec<ListRow>,
    pub total: usize,
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Build the list view from a collection.
pub fn build_list(collection: &Collection, args: &ListArgs, summary_width: usize) -> ListOutput {
    let query = args.query.as_deref().unwrap_or("");
    let matched = sort_by_recency(&search(collection, query));
    let limit = args.limit.unwrap_or(usize::MAX);

    let items = matched
        .iter()
        .take(limit)
        .map(|p| ListRow {
            id: p.id.clone(),
            name: p.name.clone(),
            client_name: p.client_name.clone(),
            status: p.status,
            last_updated: p.last_updated,
            summary: clamp_summary(&p.description, summary_width),
            next_action: p.next_action.clone(),
        })
        .collect();

    ListOutput {
        items,
        total: collection.len(),
        matched: matched.len(),
        query: Some(query.trim().to_string()).filter(|q| !q.is_empty()),
    }
}

/// Execute `pt list`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output rendering fails.
pub fn run_list(args: &ListArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let view = build_list(
        store.collection(),
        args,
        config.config.display.summary_width,
    );
    tracing::debug!(total = view.total, matched = view.matched, "list view built");

    render_mode(
        output,
        &view,
        |v, w| render_list_text(v, w),
        |v, w| render_list_human(v, w),
    )
}

fn render_list_human(view: &ListOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = match view.query {
        Some(ref q) => format!("Projects matching \"{q}\" ({} of {})", view.matched, view.total),
        None => format!("Projects ({})", view.total),
    };
    pretty_section(w, &heading)?;

    if view.items.is_empty() {
        writeln!(w, "No projects found.")?;
        return Ok(());
    }

    for (idx, row) in view.items.iter().enumerate() {
        if idx > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}  [{}]", row.name, row.status)?;
        writeln!(
            w,
            "  {}  ·  Updated {}  ·  {}",
            row.client_name,
            format_date(row.last_updated),
            row.id
        )?;
        writeln!(w, "  {}", row.summary)?;
        if let Some(ref next) = row.next_action {
            writeln!(w, "  Next: {next}")?;
        }
    }
    pretty_rule(w)
}

fn render_list_text(view: &ListOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if view.items.is_empty() {
        return Ok(());
    }
    writeln!(w, "id  status  updated  name  client")?;
    for row in &view.items {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            row.id,
            row.status,
            row.last_updated.format("%Y-%m-%d"),
            row.name,
            row.client_name
        )?;
    }
    Ok(())
}
