use chrono::{DateTime, Local};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_3_MIN: i64 = Self::MS_IN_S * 60 * 3;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const CLOCK_HM_FORMAT: &str = "%H:%M";
    pub const CLOCK_HMS_FORMAT: &str = "%H:%M:%S";

    /// Convert interval in milliseconds to a Binance-style shorthand (e.g. `30m`, `1h`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_S => "1s",
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_3_MIN => "3m",
            Self::MS_IN_5_MIN => "5m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "1h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_D => "1d",
            _ => "unknown",
        }
    }

    pub fn now_timestamp_ms() -> i64 {
        Local::now().timestamp_millis()
    }
}

fn format_local(epoch_ms: i64, fmt: &str) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&Local).format(fmt).to_string(),
        None => "--:--".to_string(),
    }
}

/// Local wall-clock `HH:MM` for an epoch timestamp (axis labels).
pub fn format_clock_hm(epoch_ms: i64) -> String {
    format_local(epoch_ms, TimeUtils::CLOCK_HM_FORMAT)
}

/// Local wall-clock `HH:MM:SS` for an epoch timestamp (tooltips, activity log).
pub fn format_clock_hms(epoch_ms: i64) -> String {
    format_local(epoch_ms, TimeUtils::CLOCK_HMS_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_have_expected_shape() {
        let hm = format_clock_hm(1_700_000_000_000);
        let hms = format_clock_hms(1_700_000_000_000);
        assert_eq!(hm.len(), 5);
        assert_eq!(hms.len(), 8);
        assert!(hms.starts_with(&hm));
    }

    #[test]
    fn out_of_range_timestamp_does_not_panic() {
        assert_eq!(format_clock_hm(i64::MAX), "--:--");
    }

    #[test]
    fn interval_shorthand() {
        assert_eq!(TimeUtils::interval_to_string(TimeUtils::MS_IN_MIN), "1m");
        assert_eq!(TimeUtils::interval_to_string(7), "unknown");
    }
}
