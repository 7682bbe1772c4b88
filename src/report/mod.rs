use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::{FlaggedProcess, Severity};

/// Processes that crossed a threshold during one run, in the order they were seen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryReport {
    pub warnings: Vec<FlaggedProcess>,
    pub criticals: Vec<FlaggedProcess>,
}

impl MemoryReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `process` under the bucket for `severity`. OK processes are dropped.
    pub fn add(&mut self, severity: Severity, process: FlaggedProcess) {
        match severity {
            Severity::Ok => {}
            Severity::Warning => self.warnings.push(process),
            Severity::Critical => self.criticals.push(process),
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            warning_count: self.warnings.len(),
            critical_count: self.criticals.len(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        reduce(&self.criticals, &self.warnings)
    }
}

pub struct ReportSummary {
    pub warning_count: usize,
    pub critical_count: usize,
}

impl ReportSummary {
    pub fn total_issues(&self) -> usize {
        self.warning_count + self.critical_count
    }

    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }
}

/// Final status of a run: overall severity plus the status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
}

impl Verdict {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

/// Folds both buckets into one status. Any critical entry wins over warnings.
pub fn reduce(criticals: &[FlaggedProcess], warnings: &[FlaggedProcess]) -> Verdict {
    if !criticals.is_empty() {
        let mut message = format!("{} {}", Severity::Critical.label(), render_bucket(criticals));
        if !warnings.is_empty() {
            message.push_str(&format!("\n{}: {}", Severity::Warning.label(), render_bucket(warnings)));
        }
        return Verdict {
            severity: Severity::Critical,
            message,
        };
    }
    if !warnings.is_empty() {
        return Verdict {
            severity: Severity::Warning,
            message: format!("{} {}", Severity::Warning.label(), render_bucket(warnings)),
        };
    }
    Verdict {
        severity: Severity::Ok,
        message: Severity::Ok.label().to_string(),
    }
}

/// Renders a bucket as a JSON list of `{label: size}` objects.
pub fn render_bucket(bucket: &[FlaggedProcess]) -> String {
    serde_json::to_string(bucket).unwrap_or_else(|_| "[]".to_string())
}

impl Serialize for FlaggedProcess {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.size)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(label: &str, size: &str) -> FlaggedProcess {
        FlaggedProcess {
            label: label.to_string(),
            size: size.to_string(),
        }
    }

    #[test]
    fn test_reduce_ok() {
        let verdict = reduce(&[], &[]);
        assert_eq!(verdict.severity, Severity::Ok);
        assert_eq!(verdict.message, "OK");
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn test_reduce_warning_only() {
        let verdict = reduce(&[], &[flagged("proc_a", "47.7 M")]);
        assert_eq!(verdict.severity, Severity::Warning);
        assert_eq!(verdict.message, r#"WARNING [{"proc_a":"47.7 M"}]"#);
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn test_reduce_critical_with_warnings() {
        let verdict = reduce(&[flagged("proc_b", "186.3 G")], &[flagged("proc_a", "47.7 M")]);
        assert_eq!(verdict.severity, Severity::Critical);
        assert_eq!(
            verdict.message,
            "CRITICAL [{\"proc_b\":\"186.3 G\"}]\nWARNING: [{\"proc_a\":\"47.7 M\"}]"
        );
        assert_eq!(verdict.exit_code(), 2);
    }

    #[test]
    fn test_reduce_critical_without_warnings() {
        let verdict = reduce(&[flagged("proc_b", "186.3 G")], &[]);
        assert_eq!(verdict.message, r#"CRITICAL [{"proc_b":"186.3 G"}]"#);
        assert!(!verdict.message.contains("WARNING"));
    }

    #[test]
    fn test_render_bucket_keeps_duplicates_in_order() {
        let bucket = vec![flagged("nginx", "12.0 M"), flagged("bash", "3.0 M"), flagged("nginx", "14.0 M")];
        assert_eq!(
            render_bucket(&bucket),
            r#"[{"nginx":"12.0 M"},{"bash":"3.0 M"},{"nginx":"14.0 M"}]"#
        );
    }

    #[test]
    fn test_report_add_and_summary() {
        let mut report = MemoryReport::new();
        assert!(!report.summary().has_issues());

        report.add(Severity::Ok, flagged("idle", "1.0 K"));
        report.add(Severity::Warning, flagged("proc_a", "47.7 M"));
        report.add(Severity::Critical, flagged("proc_b", "186.3 G"));

        let summary = report.summary();
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.total_issues(), 2);
        assert!(summary.has_issues());
        assert_eq!(report.verdict().severity, Severity::Critical);
    }
}
