use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stylebook::cli::{BuildOverrides, block_on};

#[derive(Parser)]
#[command(name = "stylebook")]
#[command(
    version,
    about = "Living styleguide generator for annotated stylesheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Project config file (default: ./stylebook.toml)")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse annotated sources and render the styleguide
    Build {
        #[arg(help = "Source files or glob patterns (overrides configured targets)")]
        patterns: Vec<String>,
        #[arg(long, short, help = "Output directory")]
        dest: Option<PathBuf>,
        #[arg(long, short, help = "Template directory")]
        template: Option<PathBuf>,
        #[arg(long, help = "Merge all toc-tagged blocks into one version-sorted file")]
        arrange_by_sections: bool,
        #[arg(long, help = "Drop source files without annotated blocks")]
        skip_empty_files: bool,
        #[arg(long, help = "Write the parsed styleguide as JSON")]
        write_output_file: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a starter stylebook.toml in the current directory
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mStylebook encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

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
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Build {
            patterns,
            dest,
            template,
            arrange_by_sections,
            skip_empty_files,
            write_output_file,
        } => {
            let overrides = BuildOverrides {
                patterns,
                dest,
                template,
                arrange_by_sections,
                skip_empty_files,
                write_output_file,
            };
            block_on(stylebook::cli::commands::build::run(
                config_path,
                overrides,
                cli.quiet,
            ))??;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                stylebook::cli::commands::config::show(config_path, &format)?;
            }
            ConfigAction::Path => {
                stylebook::cli::commands::config::path(config_path)?;
            }
            ConfigAction::Init { force } => {
                stylebook::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
