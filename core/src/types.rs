//! Shared primitive types used across the generator.

use chrono::NaiveDateTime;

/// Wall-clock timestamp of an order event. No timezone: the exported file
/// carries local time exactly as the source systems do.
pub type Timestamp = NaiveDateTime;

/// Monetary amount, always rounded to two decimals before export.
pub type Amount = f64;

/// Item count on an order line.
pub type Quantity = u32;

/// Canonical textual timestamp format used in every exported file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Round a monetary value to two decimals.
pub fn round2(value: f64) -> Amount {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(99.0), 99.0);
        assert_eq!(round2(0.004), 0.0);
    }
}
