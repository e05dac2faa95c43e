use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use widgetforge::FailurePolicy;

/// Parse the external-process failure policy from string
fn parse_failure_policy(s: &str) -> Result<FailurePolicy, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "widgetforge")]
#[command(
    version,
    about = "Interactive bootstrapper for FileMaker webviewer widget projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new widget project interactively
    New {
        #[arg(long, help = "Template repository URL override")]
        template: Option<String>,
        #[arg(long, short, help = "Base directory for the new project")]
        dir: Option<PathBuf>,
        #[arg(long, value_parser = parse_failure_policy, help = "Policy for clone/install failures: report-and-continue, report-and-abort")]
        on_failure: Option<FailurePolicy>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show {
        #[arg(long, help = "Output as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Initialize the global configuration file
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::New {
            template,
            dir,
            on_failure,
        } => {
            let config = widgetforge::ConfigLoader::load()?;
            let opts = widgetforge::cli::commands::new::NewOptions {
                template_url: template,
                project_dir: dir,
                on_failure,
            };
            let rt = Runtime::new()?;
            rt.block_on(widgetforge::cli::commands::new::run(config, opts))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                widgetforge::cli::commands::config::show(json)?;
            }
            ConfigAction::Path => {
                widgetforge::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                widgetforge::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
