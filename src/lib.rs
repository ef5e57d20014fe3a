//! Utilities for converting dates between the Gregorian calendar and the
//! Japanese imperial era calendar (和暦).
//!
//! Eras from Meiji (1868-01-25) onwards are supported; earlier dates are
//! rejected rather than mapped onto an unmodelled era.
//!
//! # Examples
//!
//! Gregorian to era calendar:
//!
//! ```
//! use wareki::gregorian_to_wareki;
//!
//! let w = gregorian_to_wareki(2026, 2, 23).unwrap();
//! assert_eq!("令和", w.era_name);
//! assert_eq!(8, w.era_year);
//! ```
//!
//! Era calendar to Gregorian, with the era given by name, native
//! abbreviation or Latin code:
//!
//! ```
//! use wareki::wareki_to_gregorian;
//!
//! let date = wareki_to_gregorian("h", 1, 1, 8).unwrap();
//! assert_eq!("1989-01-08", date.to_string());
//!
//! // 2023 (Reiwa 5) is not a leap year
//! assert!(wareki_to_gregorian("令和", 5, 2, 29).is_err());
//! ```
//!
//! All conversions go through an [`EraTable`]. The functions above use the
//! built-in one; callers needing another era list (e.g. a newly announced
//! era) build their own table, see [`EraTable::extended`].

pub mod date;
pub mod error;
pub mod wareki;

pub use date::{GregorianDate, YearType};
pub use error::{DateFault, TableError, WarekiError};
pub use wareki::{
    EraRecord, EraTable, Wareki, WarekiDate, gregorian_to_wareki, wareki_to_gregorian,
    wareki_to_gregorian_strict,
};
