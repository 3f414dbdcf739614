//! Record timestamp configuration
//!
//! Every record is stamped once, by the logger where the log call happens.
//! The stamp follows a [`ClockConfig`]: either one given to the logger at
//! build time, or the process-wide value managed here. Changing the global
//! value only affects records built after the change.

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use parking_lot::{const_rwlock, RwLock};

/// Time zone applied to record timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneSetting {
    /// The system's local zone
    #[default]
    Local,
    Utc,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl TimeZoneSetting {
    /// Express an instant in this zone
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            TimeZoneSetting::Local => instant.with_timezone(&Local).fixed_offset(),
            TimeZoneSetting::Utc => instant.fixed_offset(),
            TimeZoneSetting::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// The offset this zone always applies; `None` for `Local`
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            TimeZoneSetting::Local => None,
            TimeZoneSetting::Utc => FixedOffset::east_opt(0),
            TimeZoneSetting::Fixed(offset) => Some(*offset),
        }
    }
}

impl From<FixedOffset> for TimeZoneSetting {
    fn from(offset: FixedOffset) -> Self {
        TimeZoneSetting::Fixed(offset)
    }
}

/// How records are timestamped
///
/// # Examples
///
/// ```
/// use rust_log_dispatch::{ClockConfig, TimeZoneSetting};
/// use chrono::Timelike;
///
/// let clock = ClockConfig::new()
///     .with_timezone(TimeZoneSetting::Utc)
///     .with_microseconds(false);
///
/// let now = clock.now();
/// assert_eq!(now.nanosecond(), 0);
/// assert_eq!(now.offset().local_minus_utc(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub timezone: TimeZoneSetting,
    /// Keep sub-second digits (microsecond precision); whole seconds otherwise
    pub microseconds: bool,
}

impl ClockConfig {
    /// System zone with microsecond precision
    pub const SYSTEM_DEFAULT: ClockConfig = ClockConfig {
        timezone: TimeZoneSetting::Local,
        microseconds: true,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::SYSTEM_DEFAULT
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeZoneSetting) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_microseconds(mut self, enabled: bool) -> Self {
        self.microseconds = enabled;
        self
    }

    /// Current instant under this configuration
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.stamp(Utc::now())
    }

    /// Apply zone and precision to an instant
    pub fn stamp(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        let localized = self.timezone.localize(instant);
        let nanos = if self.microseconds {
            localized.nanosecond() / 1_000 * 1_000
        } else {
            0
        };
        localized.with_nanosecond(nanos).unwrap_or(localized)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::SYSTEM_DEFAULT
    }
}

static GLOBAL_CLOCK: RwLock<ClockConfig> = const_rwlock(ClockConfig::SYSTEM_DEFAULT);

/// Process-wide clock used by loggers built without their own
pub fn global_clock() -> ClockConfig {
    *GLOBAL_CLOCK.read()
}

pub fn set_global_clock(clock: ClockConfig) {
    *GLOBAL_CLOCK.write() = clock;
}

/// Set the process-wide time zone for records built from now on
pub fn set_timezone(timezone: impl Into<TimeZoneSetting>) {
    GLOBAL_CLOCK.write().timezone = timezone.into();
}

/// Toggle sub-second precision for records built from now on
pub fn use_microsecond_timestamps(enabled: bool) {
    GLOBAL_CLOCK.write().microseconds = enabled;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456789 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::nanoseconds(123_456_789)
    }

    #[test]
    fn test_default_is_local_with_micros() {
        let clock = ClockConfig::default();
        assert_eq!(clock.timezone, TimeZoneSetting::Local);
        assert!(clock.microseconds);
    }

    #[test]
    fn test_stamp_truncates_to_micros() {
        let clock = ClockConfig::new().with_timezone(TimeZoneSetting::Utc);
        let stamped = clock.stamp(fixed_instant());
        assert_eq!(stamped.nanosecond(), 123_456_000);
        assert_eq!(stamped.format("%6f").to_string(), "123456");
    }

    #[test]
    fn test_stamp_without_micros() {
        let clock = ClockConfig::new()
            .with_timezone(TimeZoneSetting::Utc)
            .with_microseconds(false);
        let stamped = clock.stamp(fixed_instant());
        assert_eq!(stamped.format("%6f").to_string(), "000000");
        assert_eq!(stamped.second(), 45);
    }

    #[test]
    fn test_fixed_offset_zone() {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).expect("valid offset");
        let clock = ClockConfig::new().with_timezone(offset.into());
        let stamped = clock.stamp(fixed_instant());

        assert_eq!(*stamped.offset(), offset);
        assert_eq!(stamped.hour(), 16);
        assert_eq!(stamped.minute(), 0);
        assert_eq!(stamped.with_timezone(&Utc), fixed_instant() - chrono::Duration::nanoseconds(789));
    }

    #[test]
    fn test_utc_zone_offset() {
        assert_eq!(
            TimeZoneSetting::Utc.fixed_offset(),
            FixedOffset::east_opt(0)
        );
        assert_eq!(TimeZoneSetting::Local.fixed_offset(), None);
    }
}
