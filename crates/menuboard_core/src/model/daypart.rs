//! Daypart and weekday vocabulary.
//!
//! # Responsibility
//! - Define the closed value sets used by display resolution.
//! - Normalize untrusted strings (query parameters, stored values) into them.
//!
//! # Invariants
//! - Parsing is case-insensitive and never fails loudly: unknown input is
//!   `None`, never an error.
//! - `as_str()` output is the canonical lowercase storage form and parses
//!   back to the same value.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named time-of-day display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Daypart {
    /// Morning menu.
    Breakfast,
    /// All-day menu.
    Regular,
}

impl Daypart {
    pub const ALL: [Daypart; 2] = [Daypart::Breakfast, Daypart::Regular];

    /// Parses a raw value, accepting only case-insensitive exact names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|daypart| value.eq_ignore_ascii_case(daypart.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Regular => "regular",
        }
    }
}

impl Display for Daypart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of week used for content selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Sunday-first ordering, matching the clock's day index.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Parses a weekday name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| value.eq_ignore_ascii_case(day.as_str()))
    }

    /// Maps a clock day index (0 = Sunday .. 6 = Saturday).
    ///
    /// Indices outside `0..7` wrap, so callers can pass raw modular values.
    pub fn from_sunday_index(index: u32) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    pub fn sunday_index(self) -> u32 {
        self as u32
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(value: chrono::Weekday) -> Self {
        Self::from_sunday_index(value.num_days_from_sunday())
    }
}

/// User-selected override for one resolution axis.
///
/// `Auto` means "no override" and clears any persisted value; it is distinct
/// from an unparseable stored value, which is simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverrideSelection<T> {
    #[default]
    Auto,
    Fixed(T),
}

impl<T: Copy> OverrideSelection<T> {
    pub fn as_option(&self) -> Option<T> {
        match self {
            Self::Auto => None,
            Self::Fixed(value) => Some(*value),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl<T> From<Option<T>> for OverrideSelection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Fixed(value),
            None => Self::Auto,
        }
    }
}

/// Parses a selector as typed by an operator: `auto`/`none` or a value name.
///
/// Returns `None` when the input is neither.
pub fn parse_selection<T>(
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<OverrideSelection<T>> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("auto") || trimmed.eq_ignore_ascii_case("none") {
        return Some(OverrideSelection::Auto);
    }
    parse(trimmed).map(OverrideSelection::Fixed)
}

#[cfg(test)]
mod tests {
    use super::{parse_selection, DayOfWeek, Daypart, OverrideSelection};

    #[test]
    fn daypart_parse_is_case_insensitive_and_exact() {
        assert_eq!(Daypart::parse("BREAKFAST"), Some(Daypart::Breakfast));
        assert_eq!(Daypart::parse("Regular"), Some(Daypart::Regular));
        assert_eq!(Daypart::parse("brunch"), None);
        assert_eq!(Daypart::parse(" breakfast"), None);
    }

    #[test]
    fn day_index_zero_is_sunday() {
        assert_eq!(DayOfWeek::from_sunday_index(0), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::from_sunday_index(6), DayOfWeek::Saturday);
        assert_eq!(DayOfWeek::Wednesday.sunday_index(), 3);
    }

    #[test]
    fn chrono_weekday_maps_to_same_day() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }

    #[test]
    fn selection_accepts_auto_aliases() {
        assert_eq!(
            parse_selection("AUTO", Daypart::parse),
            Some(OverrideSelection::Auto)
        );
        assert_eq!(
            parse_selection("none", DayOfWeek::parse),
            Some(OverrideSelection::Auto)
        );
        assert_eq!(
            parse_selection("Friday", DayOfWeek::parse),
            Some(OverrideSelection::Fixed(DayOfWeek::Friday))
        );
        assert_eq!(parse_selection("someday", DayOfWeek::parse), None);
    }
}
