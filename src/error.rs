use thiserror::Error;

/// Exit code for a configuration problem the operator can fix by editing flags.
pub const EXIT_USAGE: i32 = 1;
/// Exit code for configuration problems that must page, same as CRITICAL.
pub const EXIT_FATAL: i32 = 2;

/// Errors raised while turning operator input into a check configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("byte count must not be negative, got {0}")]
    InvalidInput(i128),
    #[error("can't interpret {0:?}: missing or malformed number")]
    MalformedNumber(String),
    #[error("can't interpret {0:?}: unrecognized unit")]
    UnrecognizedUnit(String),
    #[error("can't interpret {0:?}: size does not fit in a byte count")]
    SizeOverflow(String),
    #[error("couldn't parse the range {0:?}, expected warn:crit")]
    MalformedRange(String),
    #[error("minimum {minimum} is not below maximum {maximum}")]
    InvertedRange { minimum: u128, maximum: u128 },
    #[error("-r or --range is required")]
    MissingRequiredFlag,
    #[error("usage requested")]
    UsageRequested,
    #[error("invalid value for {name}: {message}")]
    InvalidOption { name: String, message: String },
}

impl CheckError {
    /// Process exit code reported to the monitoring supervisor. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::MissingRequiredFlag | CheckError::InvertedRange { .. } => EXIT_FATAL,
            _ => EXIT_USAGE,
        }
    }
}
