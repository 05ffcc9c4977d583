//! Command-line surface: `shahash [algorithm] <filename>`

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::hash::{
    Algorithm, HashComputer, HashRegistry, HashResult, HashUtilityError, MAX_BUFFER_SIZE,
};

pub const USAGE: &str = "shahash <algorithm:<md5|sha1|sha256|sha384|sha512>> <filename>";

#[derive(Parser, Debug)]
#[command(name = "shahash", version)]
#[command(about = "Hash a file and copy the hex digest to the clipboard", long_about = None)]
#[command(override_usage = USAGE)]
pub struct Cli {
    /// [ALGORITHM] FILENAME
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Vec<OsString>,

    /// List supported algorithms and exit
    #[arg(long)]
    pub list: bool,

    /// Do not copy the hash to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Read chunk size in bytes
    #[arg(
        long,
        value_name = "BYTES",
        value_parser = clap::value_parser!(u64).range(1..=MAX_BUFFER_SIZE as u64)
    )]
    pub buffer_size: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What the positional arguments asked for
#[derive(Debug, PartialEq, Eq)]
pub enum Request<'a> {
    List,
    Hash {
        algorithm: Option<&'a OsStr>,
        filename: &'a Path,
    },
    Usage,
}

impl Cli {
    pub fn request(&self) -> Request<'_> {
        if self.list {
            return Request::List;
        }
        match self.args.as_slice() {
            [filename] => Request::Hash {
                algorithm: None,
                filename: Path::new(filename),
            },
            [algorithm, filename] => Request::Hash {
                algorithm: Some(algorithm.as_os_str()),
                filename: Path::new(filename),
            },
            _ => Request::Usage,
        }
    }
}

/// Outcome of a successful invocation
#[derive(Debug)]
pub enum Outcome {
    Listed,
    Hashed(HashResult),
}

/// Run one invocation against the given collaborators.
///
/// Bad argument counts and unknown algorithm tokens both come back as
/// `CliError::Usage`, before the file is touched.
pub fn run(
    cli: &Cli,
    config: &Config,
    clipboard: &mut dyn Clipboard,
    out: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let (algorithm, filename) = match cli.request() {
        Request::List => {
            write_algorithm_list(out)?;
            return Ok(Outcome::Listed);
        }
        Request::Usage => return Err(CliError::Usage),
        Request::Hash {
            algorithm,
            filename,
        } => (resolve_algorithm(algorithm, config)?, filename),
    };

    let buffer_size = cli
        .buffer_size
        .and_then(|size| usize::try_from(size).ok())
        .unwrap_or(config.buffer_size);
    let computer = HashComputer::with_buffer_size(buffer_size);
    let result = computer.compute_hash(filename, algorithm)?;

    writeln!(
        out,
        "{} {}: {}",
        display_name(&result.file_path),
        result.algorithm,
        result.hash
    )?;

    if config.clipboard && !cli.no_clipboard {
        if let Err(e) = clipboard.set_text(&result.hash) {
            warn!("{}", e);
        }
    }

    Ok(Outcome::Hashed(result))
}

fn resolve_algorithm(token: Option<&OsStr>, config: &Config) -> Result<Algorithm, CliError> {
    match token {
        Some(token) => token
            .to_str()
            .and_then(|token| HashRegistry::resolve(token).ok())
            .ok_or(CliError::Usage),
        None => {
            if config.default_algorithm == Algorithm::Md5 {
                info!("no algorithm given, defaulting to md5");
            }
            Ok(config.default_algorithm)
        }
    }
}

fn write_algorithm_list(out: &mut dyn Write) -> std::io::Result<()> {
    for info in HashRegistry::list_algorithms() {
        let note = if info.collision_resistant {
            ""
        } else {
            " (not collision resistant)"
        };
        writeln!(out, "{:<8}{:>4} bits{}", info.name, info.output_bits, note)?;
    }
    Ok(())
}

/// File name as printed on the result line
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Failures surfaced to `main`
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Wrong argument count or unknown algorithm token
    #[error("usage: {}", USAGE)]
    Usage,

    #[error(transparent)]
    Hash(#[from] HashUtilityError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
