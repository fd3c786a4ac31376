//! geek CLI
//!
//! Command-line interface for searching and maintaining a media catalog.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings::load();
    let db_path = settings::resolve_db_path(cli.db.clone(), &settings);
    log::debug!("Using catalog database {}", db_path.display());

    match cli.command {
        Commands::Search(args) => {
            commands::search::run_search(&db_path, args, settings.search.page_size)
        }
        Commands::Show { id, json } => commands::show::run_show(&db_path, id, json),
        Commands::Import { path } => commands::import::run_import(&db_path, &path),
        Commands::Stats => commands::stats::run_stats(&db_path),
        Commands::Artwork => commands::artwork::run_artwork(&db_path),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(cli.db, &settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(&path),
            ConfigAction::SetPageSize { size } => {
                commands::config::run_config_set_page_size(size)
            }
        },
    }
}

/// Plain messages by default; timestamps and module paths with `--verbose`.
/// `RUST_LOG` still wins over both flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    builder.target(env_logger::Target::Stdout).init();
}

/// Empty line in the info stream.
pub(crate) fn log_blank() {
    log::info!("");
}
