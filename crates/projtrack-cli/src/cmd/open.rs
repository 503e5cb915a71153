//! `pt open`: resolve a view path to the project list or a single project.
//!
//! `/` opens the list, `/projects/<id>` opens one project, and any other
//! path falls back to the list.

use crate::cmd::list::{ListArgs, run_list};
use crate::cmd::show::{render_not_found, render_project};
use crate::output::OutputMode;
use clap::Args;
use projtrack_core::config::EffectiveConfig;
use projtrack_core::error::TrackerError;
use projtrack_core::route::Route;
use tracing::debug;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// View path, e.g. `/` or `/projects/p_aurora_001`.
    #[arg(default_value = "/")]
    pub path: String,
}

/// Execute `pt open <path>`.
///
/// A detail path for an unknown ID renders the not-found view; this is an
/// exact lookup, no prefix resolution.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the project does not
/// exist, or output rendering fails.
pub fn run_open(args: &OpenArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let route = Route::resolve(&args.path);
    debug!(path = %args.path, resolved = %route.path(), "route resolved");

    match route {
        Route::List => run_list(&ListArgs::default(), output, config),
        Route::Detail(id) => {
            let store = super::open_store(config)?;
            if let Some(project) = store.collection().get(&id) {
                return render_project(output, project);
            }
            let err = TrackerError::NotFound { id };
            render_not_found(output, &err)?;
            Err(err.into())
        }
    }
}
