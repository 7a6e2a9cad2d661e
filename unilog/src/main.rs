// unilog/src/main.rs
//! unilog entry point.
//!
//! Parses arguments, sets up logging and either prints the built-in
//! configuration or runs the pipeline over the input log.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::io;

use unilog::cli::Cli;
use unilog::commands::config::{print_default_config, write_default_config};
use unilog::commands::process::{run_process, ProcessOptions};
use unilog::logger;

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    if args.print_default_config {
        return print_default_config(args.format, &mut io::stdout().lock());
    }

    if let Some(path) = &args.write_default_config {
        return write_default_config(path);
    }

    run_process(&ProcessOptions {
        config_path: args.parse_config,
        input: args.input,
        secondary_log_file: args.secondary_log_file,
        print_unparsed: args.print_unparsed,
    })?;

    Ok(())
}
