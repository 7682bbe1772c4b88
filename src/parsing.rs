//! Conversion between byte counts and human readable sizes such as `10M`,
//! `1.5 Gi` or `500 kilo`.
//!
//! Every unit is a power of 1024, whichever vocabulary names it. Decoding is
//! exact integer arithmetic over the decimal digits; encoding goes through a
//! float and is only as precise as the configured number of decimal places,
//! so `format_bytes` followed by `human_to_bytes` returns the original count
//! only when it is an exact multiple of the selected unit.

use clap::ValueEnum;

use crate::error::CheckError;
use crate::types::ByteCount;

/// Most decimal places `SizeFormat` renders; larger requests are clamped.
pub const MAX_PRECISION: usize = 32;

const CUSTOMARY: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];
const CUSTOMARY_EXT: [&str; 9] = [
    "byte", "kilo", "mega", "giga", "tera", "peta", "exa", "zetta", "yotta",
];
const IEC: [&str; 9] = ["Bi", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];
const IEC_EXT: [&str; 9] = [
    "byte", "kibi", "mebi", "gibi", "tebi", "pebi", "exbi", "zebi", "yobi",
];

/// Named set of unit suffixes, index 0 is the plain byte unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SymbolVocabulary {
    #[default]
    Customary,
    CustomaryExt,
    Iec,
    IecExt,
}

impl SymbolVocabulary {
    /// Lookup order used when decoding.
    pub const ALL: [SymbolVocabulary; 4] = [
        SymbolVocabulary::Customary,
        SymbolVocabulary::CustomaryExt,
        SymbolVocabulary::Iec,
        SymbolVocabulary::IecExt,
    ];

    pub fn symbols(self) -> &'static [&'static str; 9] {
        match self {
            SymbolVocabulary::Customary => &CUSTOMARY,
            SymbolVocabulary::CustomaryExt => &CUSTOMARY_EXT,
            SymbolVocabulary::Iec => &IEC,
            SymbolVocabulary::IecExt => &IEC_EXT,
        }
    }

    /// Accepts both `iec-ext` and `iec_ext` spellings, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('_', "-");
        <Self as ValueEnum>::from_str(&normalized, true).ok()
    }
}

/// Output template for `format_bytes`. `{value}` and `{symbol}` are replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFormat {
    pub template: String,
    pub precision: usize,
}

impl Default for SizeFormat {
    fn default() -> Self {
        Self {
            template: "{value} {symbol}".to_string(),
            precision: 1,
        }
    }
}

impl SizeFormat {
    pub fn new(template: impl Into<String>, precision: usize) -> Self {
        Self {
            template: template.into(),
            precision,
        }
    }

    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    fn render(&self, value: f64, symbol: &str) -> String {
        let value = format!("{:.*}", self.precision.min(MAX_PRECISION), value);
        self.template
            .replace("{value}", &value)
            .replace("{symbol}", symbol)
    }
}

/// Multiplier of the unit at `index` (1024^index).
pub fn unit_multiplier(index: usize) -> ByteCount {
    1u128 << (10 * index)
}

/// Formats `n` with the largest unit whose multiplier does not exceed it.
pub fn format_bytes(n: ByteCount, vocabulary: SymbolVocabulary, format: &SizeFormat) -> String {
    let symbols = vocabulary.symbols();
    for index in (1..symbols.len()).rev() {
        let threshold = unit_multiplier(index);
        if n >= threshold {
            let value = n as f64 / threshold as f64;
            return format.render(value, symbols[index]);
        }
    }
    format.render(n as f64, symbols[0])
}

/// Signed entry point to `format_bytes`; negative counts are rejected.
pub fn bytes_to_human(
    n: i128,
    vocabulary: SymbolVocabulary,
    format: &SizeFormat,
) -> Result<String, CheckError> {
    if n < 0 {
        return Err(CheckError::InvalidInput(n));
    }
    Ok(format_bytes(n as ByteCount, vocabulary, format))
}

/// Parses a size such as `1 K`, `0.5kilo`, `1.5Gi` or `1024` into bytes.
///
/// The suffix is matched case-sensitively against every vocabulary; a lone
/// lowercase `k` is accepted as an alias for `K`, and `iotta` for `yotta`.
/// Every fraction digit is kept; the result is truncated towards zero.
pub fn human_to_bytes(s: &str) -> Result<ByteCount, CheckError> {
    let input = s.trim();

    let mut seen_point = false;
    let mut end = 0;
    for (i, c) in input.char_indices() {
        match c {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    let (number, suffix) = input.split_at(end);

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(CheckError::MalformedNumber(s.to_string()));
    }

    let index = match_unit(suffix.trim()).ok_or_else(|| CheckError::UnrecognizedUnit(s.to_string()))?;

    scale_decimal(whole, fraction, index).ok_or_else(|| CheckError::SizeOverflow(s.to_string()))
}

fn match_unit(letter: &str) -> Option<usize> {
    if letter.is_empty() {
        return Some(0);
    }
    for vocabulary in SymbolVocabulary::ALL {
        if let Some(index) = vocabulary.symbols().iter().position(|s| *s == letter) {
            return Some(index);
        }
    }
    match letter {
        // 'k' is the one lowercase spelling accepted for a customary unit
        "k" => Some(1),
        // older check definitions spell yotta this way
        "iotta" => Some(8),
        _ => None,
    }
}

/// `floor(whole.fraction * 1024^index)` without going through a float.
fn scale_decimal(whole: &str, fraction: &str, index: usize) -> Option<ByteCount> {
    let mut bytes: ByteCount = 0;
    for digit in whole.bytes() {
        bytes = bytes
            .checked_mul(10)?
            .checked_add(ByteCount::from(digit - b'0'))?;
    }
    bytes = bytes.checked_mul(unit_multiplier(index))?;

    // Multiply the fraction digits by 1024 in place, carrying out whole bytes
    let mut digits: Vec<u32> = fraction.bytes().map(|d| u32::from(d - b'0')).collect();
    let mut scaled: ByteCount = 0;
    for _ in 0..index {
        let mut carry = 0u32;
        for digit in digits.iter_mut().rev() {
            let product = *digit * 1024 + carry;
            *digit = product % 10;
            carry = product / 10;
        }
        scaled = scaled * 1024 + ByteCount::from(carry);
    }

    bytes.checked_add(scaled)
}
