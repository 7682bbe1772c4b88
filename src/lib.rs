// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod cli;
pub mod parsing;
pub mod range;
pub mod metrics;
pub mod collector;
pub mod report;

// Re-export commonly used items
pub use types::*;
pub use error::CheckError;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use cli::{parse_args_from, usage, Args};
pub use parsing::{bytes_to_human, format_bytes, human_to_bytes, SizeFormat, SymbolVocabulary};
pub use range::RangeSpec;
pub use metrics::*;
pub use collector::{MemoryCollector, ProcessSource, StaticSource, SysinfoSource};
pub use report::{reduce, MemoryReport, ReportSummary, Verdict};
