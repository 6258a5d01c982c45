#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use output::OutputMode;
use stitchy_core::config::default_data_dir;
use stitchy_core::persist::Storage;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "stitchy: amigurumi project tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Data directory (default: STITCHY_DIR or the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n    # Create a project with defaults\n    sy create Bunny\n\n    # Seed it with a first component\n    sy create Bunny --hook \"3.5mm (E/4)\" --color White --component Head"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        about = "Edit a project's name, hook, or color",
        after_help = "EXAMPLES:\n    sy update Bunny --name \"Bunny v2\"\n    sy update Bunny --clear-color"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        about = "Delete a project and everything under it",
        after_help = "EXAMPLES:\n    sy delete Bunny"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        about = "List projects",
        after_help = "EXAMPLES:\n    sy list\n    sy list --recent --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Show one project in full",
        after_help = "EXAMPLES:\n    sy show Bunny"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        about = "Manage a project's components",
        after_help = "EXAMPLES:\n    sy component add Bunny Arm --quantity 2\n    sy component edit Bunny Arm --color Pink\n    sy component rm Bunny Arm"
    )]
    Component {
        #[command(subcommand)]
        command: cmd::component::ComponentCommand,
    },

    #[command(
        about = "Manage a component's rounds",
        after_help = "EXAMPLES:\n    # Stitch count derived from the instruction\n    sy round add Bunny Head \"6 sc in MR\"\n\n    # Manual override when the parser cannot help\n    sy round add Bunny Head \"weird custom round\" --stitches 14"
    )]
    Round {
        #[command(subcommand)]
        command: cmd::round::RoundCommand,
    },

    #[command(
        about = "Track completion and the working round",
        after_help = "EXAMPLES:\n    sy progress done Bunny Arm\n    sy progress round Bunny Head 5"
    )]
    Progress {
        #[command(subcommand)]
        command: cmd::progress::ProgressCommand,
    },

    #[command(
        about = "Find where to pick the work back up",
        after_help = "EXAMPLES:\n    sy resume"
    )]
    Resume(cmd::resume::ResumeArgs),

    #[command(
        about = "Dry-run the stitch-count parser",
        after_help = "EXAMPLES:\n    sy parse \"(sc, inc) x 6\" --previous 12"
    )]
    Parse(cmd::parse::ParseArgs),

    #[command(
        about = "Display preferences",
        after_help = "EXAMPLES:\n    sy settings full-text on\n    sy settings full-text status"
    )]
    Settings {
        #[command(subcommand)]
        command: cmd::settings::SettingsCommand,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STITCHY_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "stitchy=debug,info"
        } else {
            "stitchy=info,warn"
        })
    });

    let format = env::var("STITCHY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        debug!("verbose mode enabled");
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    debug!(data_dir = %data_dir.display(), "opening storage");
    let mut storage = Storage::open(data_dir);
    let output = output::resolve_output_mode(cli.format, cli.json);

    match cli.command {
        Commands::Create(ref args) => cmd::create::run_create(args, output, &mut storage),
        Commands::Update(ref args) => cmd::update::run_update(args, output, &mut storage),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &mut storage),
        Commands::List(ref args) => cmd::list::run_list(args, output, &storage),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &storage),
        Commands::Component { ref command } => cmd::component::run(command, output, &mut storage),
        Commands::Round { ref command } => cmd::round::run(command, output, &mut storage),
        Commands::Progress { ref command } => cmd::progress::run(command, output, &mut storage),
        Commands::Resume(ref args) => cmd::resume::run_resume(args, output, &storage),
        Commands::Parse(ref args) => cmd::parse::run_parse(args, output),
        Commands::Settings { ref command } => cmd::settings::run(command, output, &mut storage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_anywhere() {
        let cli = Cli::parse_from(["sy", "list", "--json"]);
        assert!(cli.json);

        let cli = Cli::parse_from(["sy", "--format", "text", "resume"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }
}
