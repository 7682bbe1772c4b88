//! Command-line flags.
//!
//! Help and argument errors are not left to clap's own exit handling: a
//! monitoring supervisor reads exit code 0 as healthy, so `--help` and bad
//! flags are turned into `CheckError`s and exit non-zero.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::CheckError;
use crate::parsing::{SymbolVocabulary, MAX_PRECISION};
use crate::types::MemoryMetric;

const AFTER_HELP: &str = "\
WARN:CRIT can be given as 10M:100G to throw a warning on any process over 10M
of resident memory and a critical over 100G. Sizes can be given in formats such
as 1024B, 100k, 500M, 5G, 10T, 6P, 20Y, 1.5Gi or 2 mebi; every unit is a power
of 1024.

Exit codes: 0 OK, 1 WARNING or usage error, 2 CRITICAL, missing range or
inverted range.";

#[derive(Parser, Debug, Default)]
#[command(
    name = "proc-mem-check",
    about = "Check process memory usage against warning and critical thresholds",
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Warning and critical thresholds as WARN:CRIT, e.g. 10M:100G
    #[arg(short = 'r', long, value_name = "WARN:CRIT")]
    pub range: Option<String>,

    /// Print debugging output to stdout
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Unit symbols used in the report
    #[arg(short = 's', long, value_enum)]
    pub symbols: Option<SymbolVocabulary>,

    /// Decimal places shown for reported sizes (0 to 32)
    #[arg(short = 'p', long, value_parser = parse_precision)]
    pub precision: Option<usize>,

    /// Memory figure compared against the range
    #[arg(short = 'm', long, value_enum)]
    pub metric: Option<MemoryMetric>,
}

/// Parses `argv` (program name first) into `Args`.
pub fn parse_args_from<I, T>(argv: I) -> Result<Args, CheckError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            CheckError::UsageRequested
        }
        _ => CheckError::InvalidOption {
            name: "arguments".to_string(),
            message: first_line(&err.to_string()),
        },
    })
}

/// Full help text, printed alongside every configuration error.
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Decimal places accepted from flags and the environment.
pub fn parse_precision(value: &str) -> Result<usize, String> {
    let precision: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not a number of decimal places", value))?;
    if precision > MAX_PRECISION {
        return Err(format!("{} exceeds the maximum of {} decimal places", precision, MAX_PRECISION));
    }
    Ok(precision)
}

fn first_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
