#![forbid(unsafe_code)]

mod cmd;
mod output;
mod validate;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use projtrack_core::config;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pt: local project tracker for client engagements",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging (debug level for projtrack targets).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format (overrides --json, FORMAT, and config).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Directory holding the project store (overrides PROJTRACK_DATA_DIR and config).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List projects",
        long_about = "List projects, most recently updated first, optionally filtered by a search query.",
        after_help = "EXAMPLES:\n    # List every project\n    pt list\n\n    # Search by name, client, or status\n    pt list --search audit\n\n    # Emit machine-readable output\n    pt list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one project",
        long_about = "Show full details for a single project by ID.",
        after_help = "EXAMPLES:\n    # Show a project\n    pt show p_aurora_001\n\n    # Use a short prefix when unique\n    pt show aurora\n\n    # Emit machine-readable output\n    pt show p_aurora_001 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Open a view path",
        long_about = "Resolve a view path: / lists projects, /projects/<id> shows one, anything else lists.",
        after_help = "EXAMPLES:\n    # Open the list\n    pt open /\n\n    # Open a project\n    pt open /projects/p_aurora_001"
    )]
    Open(cmd::open::OpenArgs),

    #[command(
        next_help_heading = "Write",
        about = "Add a project",
        long_about = "Add a project. Name, client, description, phase, and notes are required; status defaults to Audit.",
        after_help = "EXAMPLES:\n    # Add a project\n    pt create --name \"Growth Audit Q1\" --client \"Acme Ventures\" \\\n        --description \"Audit analytics\" --phase \"Discovery\" --notes \"Kickoff booked\""
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Write",
        about = "Edit a project",
        long_about = "Edit fields on an existing project. Unspecified fields are kept; the last-updated time is always refreshed.",
        after_help = "EXAMPLES:\n    # Move a project to a new phase\n    pt edit p_aurora_001 --phase Validation\n\n    # Change status and clear the next action\n    pt edit aurora --status scaling --next-action \"\""
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    pt completions bash\n\n    # Generate zsh completions\n    pt completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Filter used when `PROJTRACK_LOG` is unset.
const fn default_directive(verbose: bool, debug_env: bool) -> &'static str {
    if verbose {
        "projtrack=debug,pt=debug,info"
    } else if debug_env {
        "projtrack=debug,info"
    } else {
        "projtrack=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PROJTRACK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_directive(verbose, env::var("DEBUG").is_ok()))
    });

    let format = env::var("PROJTRACK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let effective = config::resolve_config(cli.data_dir.as_deref(), cli.json)?;
    let output = output::resolve_output_mode(cli.format, &effective.resolved_output);

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &effective),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &effective),
        Commands::Open(ref args) => cmd::open::run_open(args, output, &effective),
        Commands::Create(ref args) => cmd::create::run_create(args, output, &effective),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, output, &effective),
        Commands::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_and_after_subcommand() {
        let cli = Cli::parse_from(["pt", "--json", "list"]);
        assert!(cli.json);
        let cli = Cli::parse_from(["pt", "list", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn verbose_flag_is_global() {
        assert!(Cli::parse_from(["pt", "-v", "list"]).verbose);
        assert!(Cli::parse_from(["pt", "list", "-v"]).verbose);
        assert!(Cli::parse_from(["pt", "show", "aurora", "--verbose"]).verbose);
        assert!(!Cli::parse_from(["pt", "list"]).verbose);
    }

    #[test]
    fn verbose_raises_default_log_level() {
        assert_eq!(default_directive(false, false), "projtrack=info,warn");
        assert_eq!(default_directive(false, true), "projtrack=debug,info");
        let verbose = default_directive(true, false);
        assert!(verbose.contains("projtrack=debug"));
        assert!(verbose.contains("pt=debug"));
        assert!(EnvFilter::try_new(verbose).is_ok());
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["pt", "list", "--format", "text"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn data_dir_flag_is_global() {
        let cli = Cli::parse_from(["pt", "show", "aurora", "--data-dir", "/tmp/pt"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pt")));
    }

    #[test]
    fn edit_subcommand_parses() {
        let cli = Cli::parse_from(["pt", "edit", "p_aurora_001", "--phase", "Validation"]);
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(args.id, "p_aurora_001");
        assert_eq!(args.phase.as_deref(), Some("Validation"));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["pt", "list"],
            vec!["pt", "list", "--search", "audit", "-n", "3"],
            vec!["pt", "show", "x"],
            vec!["pt", "open"],
            vec!["pt", "open", "/projects/x"],
            vec!["pt", "create", "--name", "x"],
            vec!["pt", "edit", "x"],
            vec!["pt", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?}, error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
