//! pscompat - inspect PowerShell compatibility profiles
//!
//! Loads a profile document (by path or by store id) and answers questions
//! about it through the read-only query views:
//! - Which modules, versions and commands a platform offers
//! - How a command name or parameter alias resolves
//! - Which members a .NET type exposes
//! - What platform the profile was harvested on

mod commands;
mod exit_codes;
mod logging;

use clap::{Args, Parser, Subcommand};
use commands::CommandOutput;
use exit_codes::ExitCode;
use logging::{init_logging, LogConfig, LogLevel};
use pscompat_common::error::format_error_human;
use pscompat_common::{OutputFormat, Result, StructuredError};
use pscompat_profile::{StorePaths, StoreResolver};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

/// Inspect PowerShell compatibility profiles
#[derive(Parser)]
#[command(name = "pscompat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the profile store directory
    #[arg(long, global = true)]
    profile_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a profile and report its identity and size
    Check {
        /// Profile path or store id
        profile: String,
    },

    /// One-screen overview of a profile
    Summary {
        /// Profile path or store id
        profile: String,
    },

    /// List modules and their versions
    Modules {
        /// Profile path or store id
        profile: String,

        /// Only this module (case-insensitive)
        #[arg(long)]
        name: Option<String>,
    },

    /// Resolve a command name, alias or native executable
    Command {
        /// Profile path or store id
        profile: String,

        /// Command or alias name
        name: String,

        /// Restrict to one module
        #[arg(long)]
        module: Option<String>,

        /// Restrict to one module version
        #[arg(long = "module-version")]
        module_version: Option<String>,
    },

    /// Show the platform a profile was harvested on
    Platform {
        /// Profile path or store id
        profile: String,
    },

    /// Show the members of a type (full name or accelerator)
    Types {
        /// Profile path or store id
        profile: String,

        /// Type name, e.g. System.String or [string]
        name: String,
    },

    /// List profiles in the store
    List,
}

fn main() {
    let cli = Cli::parse();

    let cli_level = LogLevel::from_flags(cli.global.quiet, cli.global.verbose);
    init_logging(&LogConfig::from_env(cli_level));

    let exit_code = match run(&cli) {
        Ok(output) => {
            emit(&cli.global, &output);
            output.exit
        }
        Err(err) => {
            emit_error(&cli.global, &err);
            ExitCode::from(&err)
        }
    };

    debug!(exit = %exit_code, "done");
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> Result<CommandOutput> {
    let store = StoreResolver::new(StorePaths {
        profile_dir: cli.global.profile_dir.clone(),
    });

    match &cli.command {
        Commands::Check { profile } => Ok(commands::check(&commands::open_profile(&store, profile)?)),
        Commands::Summary { profile } => Ok(commands::summary(&commands::open_profile(&store, profile)?)),
        Commands::Modules { profile, name } => Ok(commands::modules(
            &commands::open_profile(&store, profile)?,
            name.as_deref(),
        )),
        Commands::Command {
            profile,
            name,
            module,
            module_version,
        } => commands::command(
            &commands::open_profile(&store, profile)?,
            name,
            module.as_deref(),
            module_version.as_deref(),
        ),
        Commands::Platform { profile } => commands::platform(&commands::open_profile(&store, profile)?),
        Commands::Types { profile, name } => Ok(commands::types(&commands::open_profile(&store, profile)?, name)),
        Commands::List => commands::list(&store),
    }
}

fn emit(global: &GlobalOpts, output: &CommandOutput) {
    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&output.json) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("failed to render output: {}", e),
        },
        OutputFormat::Human => {
            if !output.human.is_empty() {
                println!("{}", output.human);
            }
        }
    }
}

fn emit_error(global: &GlobalOpts, err: &pscompat_common::Error) {
    match global.format {
        OutputFormat::Json => println!("{}", StructuredError::from(err).to_json()),
        OutputFormat::Human => {
            let use_color = !global.no_color && std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
}
