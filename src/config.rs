use std::collections::HashMap;

use clap::ValueEnum;

use crate::cli::{parse_precision, Args};
use crate::error::CheckError;
use crate::parsing::SymbolVocabulary;
use crate::range::RangeSpec;
use crate::types::{Config, MemoryMetric};

pub const RANGE_VAR: &str = "PROC_MEM_RANGE";
pub const SYMBOLS_VAR: &str = "PROC_MEM_SYMBOLS";
pub const PRECISION_VAR: &str = "PROC_MEM_PRECISION";
pub const METRIC_VAR: &str = "PROC_MEM_METRIC";

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config(args: Args) -> Result<Config, CheckError> {
    load_config_with_env(args, &SystemEnvironment)
}

/// Merges parsed flags with environment defaults. Flags take precedence.
pub fn load_config_with_env<E: EnvironmentProvider>(args: Args, env: &E) -> Result<Config, CheckError> {
    let range = args
        .range
        .or_else(|| env.get_var(RANGE_VAR))
        .filter(|r| !r.trim().is_empty())
        .ok_or(CheckError::MissingRequiredFlag)?;
    let range = RangeSpec::parse(&range)?;

    let symbols = match args.symbols {
        Some(symbols) => symbols,
        None => match env.get_var(SYMBOLS_VAR) {
            Some(name) => SymbolVocabulary::from_name(&name).ok_or_else(|| invalid(SYMBOLS_VAR, &name))?,
            None => SymbolVocabulary::default(),
        },
    };

    let precision = match args.precision {
        Some(precision) => precision,
        None => match env.get_var(PRECISION_VAR) {
            Some(value) => parse_precision(&value).map_err(|_| invalid(PRECISION_VAR, &value))?,
            None => 1,
        },
    };

    let metric = match args.metric {
        Some(metric) => metric,
        None => match env.get_var(METRIC_VAR) {
            Some(value) => {
                <MemoryMetric as ValueEnum>::from_str(value.trim(), true).map_err(|_| invalid(METRIC_VAR, &value))?
            }
            None => MemoryMetric::default(),
        },
    };

    Ok(Config {
        range,
        symbols,
        precision,
        metric,
        debug: args.debug,
    })
}

fn invalid(name: &str, value: &str) -> CheckError {
    CheckError::InvalidOption {
        name: name.to_string(),
        message: format!("unsupported value {:?}", value),
    }
}
