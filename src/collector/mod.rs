use anyhow::{Context, Result};
use std::ffi::OsStr;

use sysinfo::{ProcessesToUpdate, System, ThreadKind};
use tracing::{debug, info};

use crate::metrics::{self, ClassifySettings};
use crate::report::MemoryReport;
use crate::types::*;

/// Anything that can list the processes running right now.
pub trait ProcessSource {
    /// One sample per live process. Processes that exit while being listed are
    /// left out rather than reported as errors.
    fn samples(&mut self) -> Result<Vec<Sample>>;
}

/// Live process table via `sysinfo`.
pub struct SysinfoSource {
    sys: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoSource {
    fn samples(&mut self) -> Result<Vec<Sample>> {
        // Dead processes are dropped from the table during the refresh
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
        debug!("refreshed {} process entries", self.sys.processes().len());

        let mut samples = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            let Some(label) = process_label(process.name(), process.thread_kind()) else {
                debug!("skipping pid {}", pid.as_u32());
                continue;
            };
            samples.push(Sample {
                label,
                pid: pid.as_u32(),
                resident_bytes: ByteCount::from(process.memory()),
                virtual_bytes: ByteCount::from(process.virtual_memory()),
            });
        }
        Ok(samples)
    }
}

/// Label for a process table entry, or `None` when the entry is not reported.
fn process_label(name: &OsStr, thread_kind: Option<ThreadKind>) -> Option<String> {
    // Linux lists userland threads as tasks sharing the owner's memory
    if matches!(thread_kind, Some(ThreadKind::Userland)) {
        return None;
    }
    // an entry whose name is gone has usually exited mid-scan
    let label = name.to_string_lossy().into_owned();
    if label.is_empty() {
        return None;
    }
    Some(label)
}

/// Fixed list of samples, for tests and replaying captured data.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    samples: Vec<Sample>,
}

impl StaticSource {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl ProcessSource for StaticSource {
    fn samples(&mut self) -> Result<Vec<Sample>> {
        Ok(self.samples.clone())
    }
}

/// Runs one scan of a process source against the configured range
pub struct MemoryCollector<'a> {
    config: &'a Config,
}

impl<'a> MemoryCollector<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn settings(&self) -> ClassifySettings {
        ClassifySettings {
            metric: self.config.metric,
            symbols: self.config.symbols,
            format: self.config.size_format(),
        }
    }

    pub fn collect<S: ProcessSource + ?Sized>(&self, source: &mut S) -> Result<MemoryReport> {
        let samples = source.samples().context("failed to list processes")?;
        info!("scanned {} processes", samples.len());
        Ok(metrics::analyze_memory_usage(&self.config.range, &samples, &self.settings()))
    }
}
