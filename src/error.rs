//! Error types.

use crate::date::GregorianDate;

/// Error returned by every conversion in this crate.
///
/// The three variants are the only ways a conversion can fail; the reason a
/// date is invalid is detailed by [`DateFault`] rather than by more variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarekiError {
    /// Month or day out of range, or no such day in the resolved year.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateFault),

    /// The Gregorian date precedes the earliest era of the table.
    #[error("unsupported era: {date} precedes {earliest}, the earliest supported era")]
    UnsupportedEra {
        /// The (calendar-valid) date that was provided.
        date: GregorianDate,
        /// Name of the earliest era in the table.
        earliest: String,
    },

    /// The era reference matches no name or abbreviation in the table.
    #[error("unknown era: {reference:?}")]
    UnknownEra {
        /// The reference string as given by the caller.
        reference: String,
    },
}

/// Why a date was rejected as [`WarekiError::InvalidDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateFault {
    #[error("month {month} not in 1..=12")]
    MonthOutOfRange { month: u32 },

    #[error("day {day} not in 1..={max_day} for {year:04}-{month:02}")]
    DayOutOfRange {
        year: i32,
        month: u32,
        day: u32,
        max_day: u32,
    },

    #[error("era year must be at least 1")]
    EraYearNotPositive,

    #[error("year out of supported range")]
    YearOutOfRange,

    /// Only reported by strict composition.
    #[error("{date} is not within era {era}")]
    OutsideEra { era: String, date: GregorianDate },

    #[error("malformed date {text:?}, expected YYYY-MM-DD")]
    Malformed { text: String },
}

/// Error building an [`EraTable`](crate::wareki::EraTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("era table is empty")]
    Empty,

    #[error("era {era} starts on {start}, not after {previous} ({previous_start})")]
    NotIncreasing {
        era: String,
        start: GregorianDate,
        previous: String,
        previous_start: GregorianDate,
    },

    #[error("designator {designator:?} is used by both {first} and {second}")]
    DuplicateDesignator {
        designator: String,
        first: String,
        second: String,
    },

    #[error("era #{index} has an empty name or abbreviation")]
    EmptyDesignator { index: usize },

    #[error("era {era} has no Latin code")]
    MissingLatinCode { era: String },

    #[error("Latin code {code:?} of era {era} is not made of ASCII letters")]
    NonLatinCode { era: String, code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_date() {
        let err = WarekiError::from(DateFault::DayOutOfRange {
            year: 2023,
            month: 2,
            day: 29,
            max_day: 28,
        });
        assert_eq!(err.to_string(), "invalid date: day 29 not in 1..=28 for 2023-02");

        let err = WarekiError::from(DateFault::MonthOutOfRange { month: 13 });
        assert_eq!(err.to_string(), "invalid date: month 13 not in 1..=12");
    }

    #[test]
    fn display_unsupported_era() {
        let err = WarekiError::UnsupportedEra {
            date: GregorianDate::new(1868, 1, 24).unwrap(),
            earliest: "明治".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported era: 1868-01-24 precedes 明治, the earliest supported era"
        );
    }

    #[test]
    fn display_unknown_era() {
        let err = WarekiError::UnknownEra {
            reference: "慶応".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown era: \"慶応\"");
    }

    #[test]
    fn display_table_error() {
        let err = TableError::DuplicateDesignator {
            designator: "s".to_owned(),
            first: "昭和".to_owned(),
            second: "新元号".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "designator \"s\" is used by both 昭和 and 新元号"
        );
    }

    #[test]
    fn errors_are_send_sync_and_std() {
        fn assert_impl<T: std::error::Error + Send + Sync + 'static>() {}
        assert_impl::<WarekiError>();
        assert_impl::<DateFault>();
        assert_impl::<TableError>();
    }
}
