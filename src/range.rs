use crate::error::CheckError;
use crate::parsing::human_to_bytes;
use crate::types::ByteCount;

/// Warning and critical thresholds, `minimum < maximum` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    minimum: ByteCount,
    maximum: ByteCount,
}

impl RangeSpec {
    pub fn new(minimum: ByteCount, maximum: ByteCount) -> Result<Self, CheckError> {
        // a zero-width range could never produce a WARNING
        if minimum >= maximum {
            return Err(CheckError::InvertedRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// Parses `warn:crit`, e.g. `10M:100G`. Only the first colon separates.
    pub fn parse(spec: &str) -> Result<Self, CheckError> {
        let (left, right) = spec
            .split_once(':')
            .ok_or_else(|| CheckError::MalformedRange(spec.to_string()))?;
        let minimum = human_to_bytes(left)?;
        let maximum = human_to_bytes(right)?;
        Self::new(minimum, maximum)
    }

    pub fn minimum(&self) -> ByteCount {
        self.minimum
    }

    pub fn maximum(&self) -> ByteCount {
        self.maximum
    }
}

impl std::str::FromStr for RangeSpec {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range = RangeSpec::parse("10M:100G").unwrap();
        assert_eq!(range.minimum(), 10485760);
        assert_eq!(range.maximum(), 107374182400);

        let range: RangeSpec = "500k:1.5G".parse().unwrap();
        assert_eq!(range.minimum(), 512000);
        assert_eq!(range.maximum(), 1610612736);
    }

    #[test]
    fn test_parse_range_inverted() {
        assert_eq!(
            RangeSpec::parse("100G:10M"),
            Err(CheckError::InvertedRange { minimum: 107374182400, maximum: 10485760 })
        );
        // equal bounds are rejected too
        assert!(matches!(RangeSpec::parse("1K:1024"), Err(CheckError::InvertedRange { .. })));
    }

    #[test]
    fn test_parse_range_malformed() {
        assert_eq!(
            RangeSpec::parse("10M"),
            Err(CheckError::MalformedRange("10M".to_string()))
        );
        assert!(matches!(RangeSpec::parse(""), Err(CheckError::MalformedRange(_))));
    }

    #[test]
    fn test_parse_range_propagates_codec_errors() {
        assert!(matches!(RangeSpec::parse("10M:1 foo"), Err(CheckError::UnrecognizedUnit(_))));
        assert!(matches!(RangeSpec::parse(":10M"), Err(CheckError::MalformedNumber(_))));
        // everything after the first colon belongs to the maximum
        assert!(matches!(RangeSpec::parse("1K:2K:3K"), Err(CheckError::UnrecognizedUnit(_))));
    }
}
