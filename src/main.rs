mod age;
mod cli;
mod cmd;
mod config;
mod date_utils;
mod footer;
mod host;
mod model;
mod output;
mod qr;
mod receipt;
mod verification;
mod view;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use cmd::GenerateOptions;
use config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("RECEIPT_VIEW_LOG", "warn"))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(2);
        }
    }
}

/// Run the selected command. `Ok(false)` means it completed but the check it
/// performed failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();

    // These never need the config file.
    match cli.command {
        Command::Completions { shell } => return cmd::cmd_completions(shell).map(|_| true),
        Command::Schema => return cmd::cmd_schema().map(|_| true),
        _ => {}
    }

    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            Config::load(&cwd)?
        }
    };

    match cli.command {
        Command::View { args, toggle } => cmd::cmd_view(&config, &cli.format, &args, toggle)?,
        Command::Page { args, output } => cmd::cmd_page(&config, &args, output.as_deref())?,
        Command::Generate {
            kind,
            days,
            start,
            zipcode,
            out,
            seed,
        } => {
            let opts = GenerateOptions {
                kind: kind.to_receipt_type(),
                days,
                start,
                zipcodes: zipcode,
                out,
                seed,
            };
            cmd::cmd_generate(&config, &cli.format, opts)?;
        }
        Command::Verify { receipt, table } => {
            return cmd::cmd_verify(&config, &cli.format, &receipt, table);
        }
        Command::Schema | Command::Completions { .. } => {}
    }
    Ok(true)
}
