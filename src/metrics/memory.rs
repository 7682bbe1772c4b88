use tracing::debug;

use crate::parsing::{format_bytes, SizeFormat, SymbolVocabulary};
use crate::range::RangeSpec;
use crate::report::MemoryReport;
use crate::types::{ByteCount, FlaggedProcess, MemoryMetric, Sample, Severity};

/// How classified values are rendered into the report.
#[derive(Debug, Clone, Default)]
pub struct ClassifySettings {
    pub metric: MemoryMetric,
    pub symbols: SymbolVocabulary,
    pub format: SizeFormat,
}

/// `[maximum, ..)` is critical, `[minimum, maximum)` is a warning.
pub fn classify(range: &RangeSpec, bytes: ByteCount) -> Severity {
    if bytes >= range.maximum() {
        Severity::Critical
    } else if bytes >= range.minimum() {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Classifies one sample and files it into `report` when it crosses a threshold.
pub fn record_sample(
    report: &mut MemoryReport,
    range: &RangeSpec,
    sample: &Sample,
    settings: &ClassifySettings,
) -> Severity {
    let bytes = sample.bytes(settings.metric);
    let severity = classify(range, bytes);
    match severity {
        Severity::Ok => return severity,
        Severity::Warning => debug!(
            "{} (pid {}) {} bytes is at or above minimum {}: WARN",
            sample.label, sample.pid, bytes, range.minimum()
        ),
        Severity::Critical => debug!(
            "{} (pid {}) {} bytes is at or above maximum {}: CRIT",
            sample.label, sample.pid, bytes, range.maximum()
        ),
    }
    report.add(
        severity,
        FlaggedProcess {
            label: sample.label.clone(),
            size: format_bytes(bytes, settings.symbols, &settings.format),
        },
    );
    severity
}

/// Classifies a whole batch of samples into a fresh report.
pub fn analyze_memory_usage<'a, I>(range: &RangeSpec, samples: I, settings: &ClassifySettings) -> MemoryReport
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut report = MemoryReport::new();
    for sample in samples {
        record_sample(&mut report, range, sample, settings);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> RangeSpec {
        RangeSpec::parse("10M:100G").unwrap()
    }

    #[test]
    fn test_classify_bands() {
        let range = range();
        assert_eq!(classify(&range, 0), Severity::Ok);
        assert_eq!(classify(&range, 1024), Severity::Ok);
        assert_eq!(classify(&range, 50_000_000), Severity::Warning);
        assert_eq!(classify(&range, 200_000_000_000), Severity::Critical);
    }

    #[test]
    fn test_classify_boundaries() {
        let range = range();
        assert_eq!(classify(&range, range.minimum() - 1), Severity::Ok);
        assert_eq!(classify(&range, range.minimum()), Severity::Warning);
        assert_eq!(classify(&range, range.maximum() - 1), Severity::Warning);
        assert_eq!(classify(&range, range.maximum()), Severity::Critical);
    }

    #[test]
    fn test_record_sample_formats_size() {
        let mut report = MemoryReport::new();
        let settings = ClassifySettings::default();

        let severity = record_sample(&mut report, &range(), &Sample::new("proc_a", 50_000_000), &settings);
        assert_eq!(severity, Severity::Warning);
        assert_eq!(
            report.warnings,
            vec![FlaggedProcess { label: "proc_a".to_string(), size: "47.7 M".to_string() }]
        );

        let severity = record_sample(&mut report, &range(), &Sample::new("proc_c", 1024), &settings);
        assert_eq!(severity, Severity::Ok);
        assert_eq!(report.summary().total_issues(), 1);
    }

    #[test]
    fn test_record_sample_uses_selected_metric() {
        let sample = Sample {
            label: "mapper".to_string(),
            pid: 42,
            resident_bytes: 4096,
            virtual_bytes: 200_000_000_000,
        };
        let mut report = MemoryReport::new();

        let rss = ClassifySettings::default();
        assert_eq!(record_sample(&mut report, &range(), &sample, &rss), Severity::Ok);

        let vms = ClassifySettings {
            metric: MemoryMetric::Vms,
            symbols: SymbolVocabulary::Iec,
            format: SizeFormat::default(),
        };
        assert_eq!(record_sample(&mut report, &range(), &sample, &vms), Severity::Critical);
        assert_eq!(report.criticals[0].size, "186.3 Gi");
    }

    #[test]
    fn test_analyze_memory_usage_is_order_independent() {
        let samples = vec![
            Sample::new("proc_a", 50_000_000),
            Sample::new("proc_b", 200_000_000_000),
            Sample::new("proc_c", 1024),
        ];
        let settings = ClassifySettings::default();

        let forward = analyze_memory_usage(&range(), &samples, &settings);
        let backward = analyze_memory_usage(&range(), samples.iter().rev(), &settings);

        assert_eq!(forward.warnings, backward.warnings);
        assert_eq!(forward.criticals, backward.criticals);
        assert_eq!(forward.criticals[0].label, "proc_b");
        assert_eq!(forward.verdict().exit_code(), 2);
    }
}
