//! Canonicalization of human-readable size and duration values.
//!
//! Memory sizes use the binary convention: `K`, `M`, and `G` are powers of
//! 1024, so `"1G"` parses to 1_073_741_824 bytes. An optional trailing `B`
//! is accepted (`"512MB"`), matching is case-insensitive, and a bare integer
//! is taken as bytes. Durations accept `ms`, `s`, `m`, and `h` suffixes; a
//! bare integer is already in milliseconds.

use crate::error::SchemaError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * 1000;
const MS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Parse a memory size like `"1G"`, `"512M"`, or `"1048576"` into bytes.
pub fn parse_memory_size(value: &str) -> Result<u64, SchemaError> {
    let trimmed = value.trim().to_ascii_uppercase();
    if trimmed.is_empty() {
        return Err(invalid_size(value, "empty value"));
    }

    let without_b = trimmed.strip_suffix('B').unwrap_or(&trimmed);
    let (digits, multiplier) = if let Some(d) = without_b.strip_suffix('K') {
        (d, KIB)
    } else if let Some(d) = without_b.strip_suffix('M') {
        (d, MIB)
    } else if let Some(d) = without_b.strip_suffix('G') {
        (d, GIB)
    } else {
        (without_b, 1)
    };

    let digits = digits.trim();
    if digits.is_empty() {
        return Err(invalid_size(value, "missing numeric value"));
    }

    let count: u64 = digits
        .parse()
        .map_err(|_| invalid_size(value, "not an unsigned integer"))?;

    count
        .checked_mul(multiplier)
        .ok_or_else(|| invalid_size(value, "overflows u64"))
}

/// Parse a duration like `"10s"`, `"5m"`, or `"1500"` into milliseconds.
pub fn parse_duration_ms(value: &str) -> Result<u64, SchemaError> {
    let trimmed = value.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(invalid_duration(value, "empty value"));
    }

    let (digits, multiplier) = if let Some(d) = trimmed.strip_suffix("ms") {
        (d, 1)
    } else if let Some(d) = trimmed.strip_suffix('s') {
        (d, MS_PER_SECOND)
    } else if let Some(d) = trimmed.strip_suffix('m') {
        (d, MS_PER_MINUTE)
    } else if let Some(d) = trimmed.strip_suffix('h') {
        (d, MS_PER_HOUR)
    } else {
        (trimmed.as_str(), 1)
    };

    let digits = digits.trim();
    if digits.is_empty() {
        return Err(invalid_duration(value, "missing numeric value"));
    }

    let count: u64 = digits
        .parse()
        .map_err(|_| invalid_duration(value, "not an unsigned integer"))?;

    count
        .checked_mul(multiplier)
        .ok_or_else(|| invalid_duration(value, "overflows u64"))
}

/// Format a byte count back into the largest exact binary unit.
pub fn format_memory_size(bytes: u64) -> String {
    if bytes >= GIB && bytes % GIB == 0 {
        format!("{}G", bytes / GIB)
    } else if bytes >= MIB && bytes % MIB == 0 {
        format!("{}M", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}K", bytes / KIB)
    } else {
        format!("{bytes}B")
    }
}

/// Format a millisecond count back into the largest exact unit.
pub fn format_duration_ms(ms: u64) -> String {
    if ms >= MS_PER_HOUR && ms % MS_PER_HOUR == 0 {
        format!("{}h", ms / MS_PER_HOUR)
    } else if ms >= MS_PER_MINUTE && ms % MS_PER_MINUTE == 0 {
        format!("{}m", ms / MS_PER_MINUTE)
    } else if ms >= MS_PER_SECOND && ms % MS_PER_SECOND == 0 {
        format!("{}s", ms / MS_PER_SECOND)
    } else {
        format!("{ms}ms")
    }
}

fn invalid_size(value: &str, reason: &'static str) -> SchemaError {
    SchemaError::InvalidMemorySize {
        value: value.to_string(),
        reason,
    }
}

fn invalid_duration(value: &str, reason: &'static str) -> SchemaError {
    SchemaError::InvalidDuration {
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_size_binary_units() {
        assert_eq!(parse_memory_size("1G").unwrap(), 1_073_741_824);
        assert_eq!(parse_memory_size("512M").unwrap(), 512 * 1024 * 1024);
        assert_eq!(parse_memory_size("100K").unwrap(), 100 * 1024);
        assert_eq!(parse_memory_size("1048576").unwrap(), 1_048_576);
    }

    #[test]
    fn test_memory_size_suffix_variants() {
        assert_eq!(parse_memory_size("1g").unwrap(), 1_073_741_824);
        assert_eq!(parse_memory_size("1GB").unwrap(), 1_073_741_824);
        assert_eq!(parse_memory_size(" 512M ").unwrap(), 512 * 1024 * 1024);
        assert_eq!(parse_memory_size("64kb").unwrap(), 64 * 1024);
    }

    #[test]
    fn test_memory_size_rejects_malformed() {
        assert!(parse_memory_size("").is_err());
        assert!(parse_memory_size("G").is_err());
        assert!(parse_memory_size("1.5G").is_err());
        assert!(parse_memory_size("-1G").is_err());
        assert!(parse_memory_size("lots").is_err());
    }

    #[test]
    fn test_memory_size_error_carries_value() {
        let err = parse_memory_size("1.5G").unwrap_err();
        match err {
            SchemaError::InvalidMemorySize { value, .. } => assert_eq!(value, "1.5G"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duration_suffixes() {
        assert_eq!(parse_duration_ms("10s").unwrap(), 10_000);
        assert_eq!(parse_duration_ms("5m").unwrap(), 300_000);
        assert_eq!(parse_duration_ms("2h").unwrap(), 7_200_000);
        assert_eq!(parse_duration_ms("1500ms").unwrap(), 1_500);
        assert_eq!(parse_duration_ms("250").unwrap(), 250);
    }

    #[test]
    fn test_duration_rejects_malformed() {
        assert!(parse_duration_ms("").is_err());
        assert!(parse_duration_ms("s").is_err());
        assert!(parse_duration_ms("10x").is_err());
        assert!(parse_duration_ms("-5s").is_err());
        assert!(parse_duration_ms("1.5s").is_err());
    }

    #[test]
    fn test_format_memory_size() {
        assert_eq!(format_memory_size(1_073_741_824), "1G");
        assert_eq!(format_memory_size(512 * 1024 * 1024), "512M");
        assert_eq!(format_memory_size(64 * 1024), "64K");
        assert_eq!(format_memory_size(1000), "1000B");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(10_000), "10s");
        assert_eq!(format_duration_ms(300_000), "5m");
        assert_eq!(format_duration_ms(7_200_000), "2h");
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(0), "0ms");
    }

    #[test]
    fn test_units_roundtrip_exact() {
        for value in ["1G", "512M", "64K"] {
            let bytes = parse_memory_size(value).unwrap();
            assert_eq!(format_memory_size(bytes), value);
        }
        for value in ["10s", "5m", "2h", "250ms"] {
            let ms = parse_duration_ms(value).unwrap();
            assert_eq!(format_duration_ms(ms), value);
        }
    }
}
