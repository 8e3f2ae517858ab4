//! Numeric conversion and formatting utilities for biodash-gui.
//!
//! These functions handle conversions between numeric types with explicit
//! handling of precision loss.

use std::time::Duration;

/// Convert f64 to f32, saturating at the f32 range.
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_f32(value: f64) -> f32 {
    value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}

/// Format a request duration as milliseconds, or seconds past one second.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_duration(Duration::from_millis(42)), "42 ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50 s");
/// ```
#[must_use]
pub fn format_duration(d: Duration) -> String {
    if d >= Duration::from_secs(1) {
        format!("{:.2} s", d.as_secs_f64())
    } else {
        format!("{} ms", d.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42 ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50 s");
    }

    #[test]
    fn test_f64_to_f32_saturates() {
        assert!((f64_to_f32(2.5) - 2.5).abs() < f32::EPSILON);
        assert_eq!(f64_to_f32(f64::MAX), f32::MAX);
    }
}
