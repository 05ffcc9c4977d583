use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use shahash::cli::{self, Cli, CliError, USAGE};
use shahash::clipboard::{Clipboard, NoClipboard, SystemClipboard};
use shahash::config::Config;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            println!("{}", USAGE);
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(CliError::Usage) => println!("{}", USAGE),
                _ => eprintln!("{} {}", "Error:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let mut clipboard: Box<dyn Clipboard> = if config.clipboard && !cli.no_clipboard {
        Box::new(SystemClipboard::new())
    } else {
        Box::new(NoClipboard)
    };

    let stdout = io::stdout();
    cli::run(cli, &config, clipboard.as_mut(), &mut stdout.lock())?;
    Ok(())
}
