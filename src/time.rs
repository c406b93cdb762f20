//! Wall-clock time as seen by the face

use chrono::Timelike;

/// Hour and minute sampled once per redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSnapshot {
    /// 0–23
    hour: u8,
    /// 0–59
    minute: u8,
}

impl TimeSnapshot {
    /// Checked constructor, `None` unless `hour < 24` and `minute < 60`
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Take hour and minute from any chrono time value
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }
}

/// How the hour is shown
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockFormat {
    /// 1–12
    TwelveHour,
    /// 0–23
    #[default]
    TwentyFourHour,
}

impl ClockFormat {
    pub const fn from_24h_style(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }

    pub const fn is_24h_style(self) -> bool {
        matches!(self, Self::TwentyFourHour)
    }

    /// Map a 0–23 hour to the hour that is displayed.
    ///
    /// In 12 hour mode midnight shows as 12 and the afternoon hours wrap to 1–11.
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::TwentyFourHour => hour,
            Self::TwelveHour => match hour {
                0 => 12,
                13..=23 => hour - 12,
                _ => hour,
            },
        }
    }
}

/// Host clock
///
/// Exposes the current wall-clock time and controls delivery of per-minute
/// ticks. How ticks reach the face is up to the host; the face only asks for
/// them to start and stop.
pub trait TimeSource {
    /// Current local time
    fn now(&self) -> TimeSnapshot;

    /// Start delivering a tick every time the minute changes
    fn subscribe_minutes(&mut self);

    /// Stop delivering ticks
    fn unsubscribe(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_snapshot_bounds() {
        assert!(TimeSnapshot::new(23, 59).is_some());
        assert!(TimeSnapshot::new(0, 0).is_some());
        assert!(TimeSnapshot::new(24, 0).is_none());
        assert!(TimeSnapshot::new(12, 60).is_none());
    }

    #[test]
    fn test_snapshot_from_chrono() {
        let time = NaiveTime::from_hms_opt(21, 7, 42).unwrap();
        let snapshot = TimeSnapshot::from_time(&time);
        assert_eq!(snapshot.hour(), 21);
        assert_eq!(snapshot.minute(), 7);
    }

    #[test]
    fn test_display_hour_ranges() {
        for hour in 0..24 {
            let twelve = ClockFormat::TwelveHour.display_hour(hour);
            assert!((1..=12).contains(&twelve), "hour {} -> {}", hour, twelve);

            let twenty_four = ClockFormat::TwentyFourHour.display_hour(hour);
            assert_eq!(twenty_four, hour);
        }
    }

    #[test]
    fn test_twelve_hour_conversion() {
        let format = ClockFormat::TwelveHour;
        assert_eq!(format.display_hour(0), 12);
        assert_eq!(format.display_hour(1), 1);
        assert_eq!(format.display_hour(12), 12);
        assert_eq!(format.display_hour(13), 1);
        assert_eq!(format.display_hour(23), 11);
    }

    #[test]
    fn test_24h_style_flag() {
        assert_eq!(ClockFormat::from_24h_style(true), ClockFormat::TwentyFourHour);
        assert_eq!(ClockFormat::from_24h_style(false), ClockFormat::TwelveHour);
        assert!(ClockFormat::default().is_24h_style());
    }
}
