use clap::ValueEnum;

use crate::parsing::{SizeFormat, SymbolVocabulary};
use crate::range::RangeSpec;

/// Exact byte count. Wide enough for the yotta unit (2^80) and then some.
pub type ByteCount = u128;

#[derive(Debug, Clone)]
pub struct Config {
    pub range: RangeSpec,
    pub symbols: SymbolVocabulary,
    pub precision: usize,
    pub metric: MemoryMetric,
    pub debug: bool,
}

impl Config {
    pub fn size_format(&self) -> SizeFormat {
        SizeFormat::with_precision(self.precision)
    }
}

/// Which memory figure of a process is compared against the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MemoryMetric {
    /// Resident set size
    #[default]
    Rss,
    /// Virtual memory size
    Vms,
}

/// One observed process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub label: String,
    pub pid: u32,
    pub resident_bytes: ByteCount,
    pub virtual_bytes: ByteCount,
}

impl Sample {
    pub fn new(label: impl Into<String>, resident_bytes: ByteCount) -> Self {
        Self {
            label: label.into(),
            pid: 0,
            resident_bytes,
            virtual_bytes: resident_bytes,
        }
    }

    pub fn bytes(&self, metric: MemoryMetric) -> ByteCount {
        match metric {
            MemoryMetric::Rss => self.resident_bytes,
            MemoryMetric::Vms => self.virtual_bytes,
        }
    }
}

/// Outcome of comparing one value against a `RangeSpec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// One entry of a WARNING or CRITICAL bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedProcess {
    pub label: String,
    pub size: String,
}
