mod commands;
mod paths;
mod render;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, WriteLogger};

use commands::{ExportArgs, SearchArgs};

/// Search and export tables described by JSON documents.
#[derive(Debug, Parser)]
#[command(name = "tabex", version, about)]
struct Cli {
    /// Table document (columns, dataSource and props)
    document: PathBuf,

    /// Log at debug level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the rows as a table
    Show(SearchArgs),
    /// List the fields an export offers
    Fields,
    /// Write the rows to a CSV file
    Export(ExportArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let Some(dir) = paths::log_dir() else { return };
    let Ok(log_file) = paths::rotate_logs(&dir, paths::KEPT_LOGS) else { return };
    if let Ok(file) = File::create(&log_file) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("{:?}", cli);

    let result = match &cli.command {
        Command::Show(args) => commands::show(&cli.document, args),
        Command::Fields => commands::fields(&cli.document),
        Command::Export(args) => commands::export(&cli.document, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
