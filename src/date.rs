//! Gregorian dates and the validity rules shared by both conversion
//! directions.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DateFault;

/// A calendar-valid date in the (proleptic) Gregorian calendar.
///
/// Values can only be obtained through validating constructors, so holding a
/// `GregorianDate` means the day exists. Ordering is lexicographic on
/// `(year, month, day)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Ymd")]
pub struct GregorianDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Deserialize)]
struct Ymd {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<Ymd> for GregorianDate {
    type Error = DateFault;
    fn try_from(raw: Ymd) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

/// JDN of the last day representable with an `i32` year.
const MAX_JDN: i64 = jdn_of(i32::MAX as i64, 12, 31);

const fn jdn_of(y: i64, m: i64, d: i64) -> i64 {
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075
}

impl GregorianDate {
    /// Creates a date after checking it against the Gregorian calendar.
    ///
    /// `year` is an astronomical year number, i.e. 1 BC is `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use wareki::GregorianDate;
    ///
    /// assert!(GregorianDate::new(2024, 2, 29).is_ok());
    /// assert!(GregorianDate::new(2023, 2, 29).is_err());
    /// ```
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateFault> {
        let max_day = days_in_month(year, month).ok_or(DateFault::MonthOutOfRange { month })?;
        if !(1..=max_day).contains(&day) {
            return Err(DateFault::DayOutOfRange {
                year,
                month,
                day,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }
    pub fn day(&self) -> u32 {
        self.day
    }
    /// Returns the date in `(year, month, day)` format.
    pub fn ymd(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// Returns the Julian day number (JDN) of the date.
    ///
    /// # Example
    ///
    /// ```
    /// use wareki::GregorianDate;
    ///
    /// let date = GregorianDate::new(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn jdn(&self) -> i64 {
        jdn_of(self.year.into(), self.month.into(), self.day.into())
    }

    /// Creates a date from a Julian day number.
    ///
    /// Supported range begins from January 1, 4713 BC, proleptic Julian
    /// calendar (JDN 0). Returns `None` outside it, or if the year would not
    /// fit in an `i32`.
    pub fn from_jdn(jdn: i64) -> Option<Self> {
        if !(0..=MAX_JDN).contains(&jdn) {
            return None;
        }
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        Some(Self {
            year: i32::try_from(year).ok()?,
            month: month as u32,
            day: day as u32,
        })
    }

    /// Moves the date by `days` (negative goes backwards).
    ///
    /// Returns `None` if the result leaves the range of [`from_jdn`](Self::from_jdn).
    ///
    /// # Example
    ///
    /// ```
    /// use wareki::GregorianDate;
    ///
    /// let date = GregorianDate::new(2019, 5, 1).unwrap();
    /// assert_eq!("2019-04-30", date.checked_add_days(-1).unwrap().to_string());
    /// ```
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        Self::from_jdn(self.jdn().checked_add(days)?)
    }
}

impl Sub<GregorianDate> for GregorianDate {
    type Output = i64;
    fn sub(self, rhs: GregorianDate) -> Self::Output {
        self.jdn() - rhs.jdn()
    }
}

/// ISO 8601 form, `YYYY-MM-DD`.
impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for GregorianDate {
    type Err = DateFault;

    /// Parses `YYYY-MM-DD`; a leading `-` marks a negative year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DateFault::Malformed { text: s.to_owned() };
        let mut it = s.rsplitn(3, '-');
        let (Some(d), Some(m), Some(y)) = (it.next(), it.next(), it.next()) else {
            return Err(malformed());
        };
        let year = y.parse().map_err(|_| malformed())?;
        let month = m.parse().map_err(|_| malformed())?;
        let day = d.parse().map_err(|_| malformed())?;
        Self::new(year, month, day)
    }
}

impl From<chrono::NaiveDate> for GregorianDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl TryFrom<GregorianDate> for chrono::NaiveDate {
    type Error = DateFault;
    fn try_from(date: GregorianDate) -> Result<Self, Self::Error> {
        chrono::NaiveDate::from_ymd_opt(date.year, date.month, date.day)
            .ok_or(DateFault::YearOutOfRange)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in `month` of `year`, or `None` if `month` is not in
/// `1..=12`.
///
/// # Example
///
/// ```
/// use wareki::date::days_in_month;
///
/// assert_eq!(Some(29), days_in_month(2000, 2));
/// assert_eq!(Some(28), days_in_month(1900, 2));
/// assert_eq!(None, days_in_month(2000, 13));
/// ```
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    Some(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as u32,
        _ => return None,
    })
}

/// Whether `(year, month, day)` names an existing Gregorian day.
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    GregorianDate::new(year, month, day).is_ok()
}
