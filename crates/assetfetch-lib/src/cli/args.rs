use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOverrides {
    pub output_dir: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub fail_on_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Download {
        config_path: Option<String>,
        overrides: ManifestOverrides,
    },
    List {
        config_path: Option<String>,
        base_url: Option<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "assetfetch",
    version,
    about = "Download a fixed set of logos, icons and documents from a CDN into a local directory"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Loads the asset manifest from a file instead of the built-in one",
        global = true
    )]
    config: Option<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Overrides the output directory of the manifest"
    )]
    output_dir: Option<String>,

    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Overrides the CDN base URL of the manifest",
        global = true
    )]
    base_url: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "Overrides the per-request timeout of the manifest"
    )]
    timeout: Option<u64>,

    #[arg(
        long = "fail-on-error",
        help = "Exit with an error if any asset fails to download"
    )]
    fail_on_error: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print every asset and the URL it is fetched from, without downloading
    List,
}

fn log_level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn command_from(cli: Cli) -> Result<Command, clap::Error> {
    match cli.command {
        None => Ok(Command::Download {
            config_path: cli.config,
            overrides: ManifestOverrides {
                output_dir: cli.output_dir,
                base_url: cli.base_url,
                timeout_secs: cli.timeout,
                fail_on_error: cli.fail_on_error,
            },
        }),
        Some(CliCommand::List) => {
            // Only reachable as `assetfetch <flag> list`; `list <flag>` fails to parse.
            if cli.output_dir.is_some() || cli.timeout.is_some() || cli.fail_on_error {
                return Err(Cli::command().error(
                    ErrorKind::ArgumentConflict,
                    "--output-dir, --timeout and --fail-on-error only apply to downloads, not to `list`",
                ));
            }
            Ok(Command::List {
                config_path: cli.config,
                base_url: cli.base_url,
            })
        }
    }
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();
    let log_level = log_level_for(cli.verbose);

    // Progress goes to stdout; diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    Args {
        command: command_from(cli).unwrap_or_else(|e| e.exit()),
        log_level,
    }
}
