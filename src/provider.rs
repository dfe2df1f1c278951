use thiserror::Error;
use time::{Date, OffsetDateTime};

/// Number of consecutive daily entries returned by [`timeline()`].
pub(crate) const LOOKAHEAD_DAYS: usize = 5;

/// One day's worth of widget data: the calendar date to display and whether
/// to draw it with the decorative glyphs.  Never mutated after construction;
/// entries for the same date are interchangeable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayEntry {
    pub(crate) date: Date,
    pub(crate) fun_font: bool,
}

/// The single configuration parameter: an optional decorative-font switch.
/// Absent means "not configured", which resolves to `false`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    pub(crate) fun_font: Option<bool>,
}

impl Config {
    pub(crate) fn fun_font(&self) -> bool {
        self.fun_font.unwrap_or(false)
    }
}

/// When the host should request a fresh timeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RefreshPolicy {
    /// Refresh once the last returned entry's date has passed.
    AtEnd,
}

/// An ordered run of daily entries plus the policy telling the host when to
/// ask for the next one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Timeline {
    entries: Vec<DayEntry>,
    policy: RefreshPolicy,
}

impl Timeline {
    pub(crate) fn entries(&self) -> &[DayEntry] {
        &self.entries
    }

    pub(crate) fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// True once `today` has moved past the last entry's date.
    pub(crate) fn is_exhausted(&self, today: Date) -> bool {
        self.entries.last().map_or(true, |e| today > e.date)
    }

    /// Index of the entry for `date`, if it falls inside the window.
    pub(crate) fn position_of(&self, date: Date) -> Option<usize> {
        self.entries.iter().position(|e| e.date == date)
    }
}

/// The calendar cannot represent a computed date.  Unreachable for any
/// reference date a clock can produce; callers treat it as fatal.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("calendar arithmetic left the supported date range")]
pub(crate) struct DateArithmeticError;

/// Immediate, non-decorative entry for the given day, for when no real data
/// is available yet.
pub(crate) fn placeholder(day: Date) -> DayEntry {
    DayEntry {
        date: day,
        fun_font: false,
    }
}

/// Single current-day entry honoring the configured font switch.
pub(crate) fn snapshot(now: OffsetDateTime, config: &Config) -> DayEntry {
    DayEntry {
        date: now.date(),
        fun_font: config.fun_font(),
    }
}

/// Builds the full lookahead window: `LOOKAHEAD_DAYS` consecutive daily
/// entries starting at the calendar day containing `now`, each carrying the
/// configured font switch.  Pure in its inputs, so identical arguments
/// reproduce the identical timeline.
pub(crate) fn timeline(
    now: OffsetDateTime,
    config: &Config,
) -> Result<Timeline, DateArithmeticError> {
    timeline_from(now.date(), config)
}

/// As [`timeline()`], but starting from an already-normalized calendar day.
pub(crate) fn timeline_from(day: Date, config: &Config) -> Result<Timeline, DateArithmeticError> {
    let fun_font = config.fun_font();
    let mut entries = Vec::with_capacity(LOOKAHEAD_DAYS);
    let mut date = day;
    for offset in 0..LOOKAHEAD_DAYS {
        entries.push(DayEntry { date, fun_font });
        if offset + 1 < LOOKAHEAD_DAYS {
            date = date.next_day().ok_or(DateArithmeticError)?;
        }
    }
    Ok(Timeline {
        entries,
        policy: RefreshPolicy::AtEnd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_timeline_window() {
        let config = Config {
            fun_font: Some(true),
        };
        let tl = timeline(datetime!(2024-03-12 14:30 UTC), &config).unwrap();
        assert_eq!(tl.entries().len(), LOOKAHEAD_DAYS);
        for (i, entry) in tl.entries().iter().enumerate() {
            let days = i64::try_from(i).unwrap();
            assert_eq!(entry.date, date!(2024 - 03 - 12) + time::Duration::days(days));
            assert!(entry.fun_font);
        }
        assert_eq!(tl.policy(), RefreshPolicy::AtEnd);
    }

    #[test]
    fn test_timeline_crosses_year_boundary() {
        let tl = timeline(datetime!(2024-12-30 08:00 UTC), &Config::default()).unwrap();
        let dates = tl.entries().iter().map(|e| e.date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 12 - 30),
                date!(2024 - 12 - 31),
                date!(2025 - 01 - 01),
                date!(2025 - 01 - 02),
                date!(2025 - 01 - 03),
            ]
        );
    }

    #[test]
    fn test_timeline_crosses_leap_day() {
        let tl = timeline(datetime!(2024-02-27 23:59 UTC), &Config::default()).unwrap();
        let dates = tl.entries().iter().map(|e| e.date).collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 02 - 27),
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
            ]
        );
    }

    #[test]
    fn test_timeline_idempotent() {
        let now = datetime!(2024-09-22 06:15 UTC);
        let config = Config {
            fun_font: Some(false),
        };
        assert_eq!(timeline(now, &config), timeline(now, &config));
    }

    #[test]
    fn test_flag_propagated_unchanged() {
        let now = datetime!(2024-05-30 12:00 UTC);
        for fun in [false, true] {
            let config = Config {
                fun_font: Some(fun),
            };
            let tl = timeline(now, &config).unwrap();
            assert!(tl.entries().iter().all(|e| e.fun_font == fun));
        }
    }

    #[test]
    fn test_unset_config_resolves_to_plain_font() {
        let tl = timeline(datetime!(2024-05-30 12:00 UTC), &Config::default()).unwrap();
        assert!(tl.entries().iter().all(|e| !e.fun_font));
    }

    #[test]
    fn test_placeholder_is_plain_current_day() {
        let entry = placeholder(date!(2024 - 10 - 25));
        assert_eq!(
            entry,
            DayEntry {
                date: date!(2024 - 10 - 25),
                fun_font: false,
            }
        );
    }

    #[test]
    fn test_snapshot_honors_config() {
        let now = datetime!(2024-10-25 21:45 UTC);
        let config = Config {
            fun_font: Some(true),
        };
        assert_eq!(
            snapshot(now, &config),
            DayEntry {
                date: date!(2024 - 10 - 25),
                fun_font: true,
            }
        );
    }

    #[test]
    fn test_exhaustion_at_end() {
        let tl = timeline(datetime!(2024-12-30 08:00 UTC), &Config::default()).unwrap();
        assert!(!tl.is_exhausted(date!(2024 - 12 - 30)));
        assert!(!tl.is_exhausted(date!(2025 - 01 - 03)));
        assert!(tl.is_exhausted(date!(2025 - 01 - 04)));
    }

    #[test]
    fn test_position_of() {
        let tl = timeline(datetime!(2024-12-30 08:00 UTC), &Config::default()).unwrap();
        assert_eq!(tl.position_of(date!(2025 - 01 - 01)), Some(2));
        assert_eq!(tl.position_of(date!(2025 - 01 - 04)), None);
    }
}
