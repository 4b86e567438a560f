use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use codedoc::cli::{Cli, Commands};
use codedoc::error::ConfigurationError;
use codedoc::output::{self, Verbosity};
use codedoc::{CodedocContext, commands};
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        if let Some(config_error) = e.downcast_ref::<ConfigurationError>() {
            eprintln!(
                "{} {}",
                format!("{}:", config_error.error_type()).red().bold(),
                config_error
            );
        } else {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    output::set_verbosity(verbosity);
    init_logging(verbosity);

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let mut ctx = CodedocContext::new()?;
    if let Some(store) = cli.store {
        ctx = ctx.with_store_path(store);
    }

    match cli.command {
        Commands::Init { folders, force } => {
            commands::init::execute(&ctx, &folders, force)?;
        }
        Commands::Scan => {
            commands::scan::execute(&ctx)?;
        }
        Commands::Generate { output, stdout } => {
            if let Some(output) = output {
                ctx = ctx.with_output_path(output);
            }
            commands::generate::execute(&ctx, stdout)?;
        }
        Commands::Status => {
            commands::status::execute(&ctx)?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { .. } => unreachable!("handled before context creation"),
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity flags
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
