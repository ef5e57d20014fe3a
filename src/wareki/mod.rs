//! Japanese imperial era calendar (和暦)
//!
//! Note: 元号関係の用語が多いため、本モジュールのドキュメントは日本語で記す。
//!
//! 明治以降の元号に対応する。それ以前の日付は [`WarekiError::UnsupportedEra`] として拒否し、
//! 旧元号に推定で割り当てることはしない。元号表は [`era`] を参照。
//!
//! 元号年は施行日を含むグレゴリオ暦年を元年（1年）とし、以後グレゴリオ暦の年替わりごとに
//! 一つ増える。
//!
//! # 用例
//!
//! ```
//! use wareki::{gregorian_to_wareki, wareki_to_gregorian};
//!
//! let w = gregorian_to_wareki(2026, 2, 23).unwrap();
//! assert_eq!(("令和", 8), (w.era_name.as_str(), w.era_year));
//! assert_eq!("令和8年", w.to_string());
//!
//! let date = wareki_to_gregorian("R", 8, 2, 23).unwrap();
//! assert_eq!((2026, 2, 23), date.ymd());
//! ```

use std::fmt::{self as std_fmt, Display};

use serde::{Deserialize, Serialize};

use crate::date::GregorianDate;
use crate::error::{DateFault, WarekiError};

pub mod era;
pub mod fmt;

pub use era::{EraRecord, EraTable};

/// 元号と元号年。月日は含まない（変換で月日は変わらない）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wareki {
    /// 元号名
    pub era_name: String,
    /// 元号年、元年は 1
    pub era_year: u32,
}

impl Wareki {
    /// 元年なら `true`
    pub fn is_gannen(&self) -> bool {
        self.era_year == 1
    }
}

/// `令和8年`、元年は `令和元年`
impl Display for Wareki {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(f, "{}{}年", self.era_name, fmt::era_year(self.era_year))
    }
}

/// 元号・元号年・月・日による日付。
///
/// 入力として組み立てたものは未検証であり、[`to_gregorian`](Self::to_gregorian) で検証される。
///
/// # 用例
///
/// ```
/// use wareki::{GregorianDate, WarekiDate};
///
/// let date = GregorianDate::new(2019, 5, 1).unwrap();
/// let w = WarekiDate::from_gregorian(date).unwrap();
/// assert_eq!("令和元年5月1日", w.to_string());
/// assert_eq!(Ok(date), w.to_gregorian());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarekiDate {
    /// 元号名（または略号）
    pub era_name: String,
    /// 元号年、元年は 1
    pub era_year: u32,
    pub month: u32,
    pub day: u32,
}

impl WarekiDate {
    /// 組み込み元号表で西暦日付を和暦日付に変換する。
    pub fn from_gregorian(date: GregorianDate) -> Result<Self, WarekiError> {
        Self::from_gregorian_in(EraTable::builtin(), date)
    }

    /// 指定した元号表で西暦日付を和暦日付に変換する。
    pub fn from_gregorian_in(table: &EraTable, date: GregorianDate) -> Result<Self, WarekiError> {
        let Wareki { era_name, era_year } = table.wareki_for(date)?;
        Ok(Self {
            era_name,
            era_year,
            month: date.month(),
            day: date.day(),
        })
    }

    /// 組み込み元号表で西暦日付に変換する。
    pub fn to_gregorian(&self) -> Result<GregorianDate, WarekiError> {
        self.to_gregorian_in(EraTable::builtin())
    }

    /// 指定した元号表で西暦日付に変換する。
    pub fn to_gregorian_in(&self, table: &EraTable) -> Result<GregorianDate, WarekiError> {
        table.to_gregorian(&self.era_name, self.era_year, self.month, self.day)
    }

    /// 元号・元号年部分
    pub fn wareki(&self) -> Wareki {
        Wareki {
            era_name: self.era_name.clone(),
            era_year: self.era_year,
        }
    }
}

/// `令和8年2月23日`、元年は `令和元年5月1日`
impl Display for WarekiDate {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(f, "{}{}月{}日", self.wareki(), self.month, self.day)
    }
}

impl EraTable {
    /// 西暦年月日から元号と元号年を求める。
    ///
    /// 年月日が暦上存在しなければ [`WarekiError::InvalidDate`]、最古の元号より前なら
    /// [`WarekiError::UnsupportedEra`]。
    pub fn to_wareki(&self, year: i32, month: u32, day: u32) -> Result<Wareki, WarekiError> {
        GregorianDate::new(year, month, day)
            .map_err(WarekiError::from)
            .inspect_err(|e| tracing::trace!(year, month, day, error = %e, "rejected gregorian date"))
            .and_then(|date| self.wareki_for(date))
    }

    /// 検証済みの西暦日付から元号と元号年を求める。
    pub fn wareki_for(&self, date: GregorianDate) -> Result<Wareki, WarekiError> {
        let Some(era) = self.lookup_by_date(date) else {
            let err = WarekiError::UnsupportedEra {
                date,
                earliest: self.earliest().name.clone(),
            };
            tracing::trace!(%date, error = %err, "rejected gregorian date");
            return Err(err);
        };
        // 施行日以降なので差は非負
        let era_year = u32::try_from(i64::from(date.year()) - i64::from(era.start.year()) + 1)
            .map_err(|_| DateFault::YearOutOfRange)?;
        tracing::trace!(%date, era = %era.name, era_year, "resolved wareki");
        Ok(Wareki {
            era_name: era.name.clone(),
            era_year,
        })
    }

    /// 元号（元号名・略号・ラテン文字略号）と元号年・月・日から西暦日付を求める。
    ///
    /// 元号が見つからなければ [`WarekiError::UnknownEra`]、元号年が 0、または求めた西暦年に
    /// その月日が存在しなければ [`WarekiError::InvalidDate`]。
    ///
    /// 元年の施行日前の月日（例：令和元年4月30日）や次の元号の施行後の日付も、暦上存在すれば
    /// そのまま受け付ける。拒否するには [`to_gregorian_strict`](Self::to_gregorian_strict) を使う。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::EraTable;
    ///
    /// let table = EraTable::builtin();
    /// assert_eq!((2024, 2, 29), table.to_gregorian("令和", 6, 2, 29).unwrap().ymd());
    /// assert!(table.to_gregorian("令和", 5, 2, 29).is_err());
    /// assert_eq!((2019, 4, 30), table.to_gregorian("令和", 1, 4, 30).unwrap().ymd());
    /// ```
    pub fn to_gregorian(
        &self,
        reference: &str,
        era_year: u32,
        month: u32,
        day: u32,
    ) -> Result<GregorianDate, WarekiError> {
        self.resolve(reference)
            .and_then(|era| compose(era, era_year, month, day))
            .inspect(|date| tracing::trace!(reference, era_year, %date, "resolved gregorian date"))
            .inspect_err(|e| {
                tracing::trace!(reference, era_year, month, day, error = %e, "rejected wareki date")
            })
    }

    /// [`to_gregorian`](Self::to_gregorian) と同じだが、求めた日付がその元号の期間
    /// `[施行日, 次の元号の施行日)` 外なら [`DateFault::OutsideEra`] で拒否する。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::{DateFault, EraTable, WarekiError};
    ///
    /// let table = EraTable::builtin();
    /// assert_eq!((2019, 5, 1), table.to_gregorian_strict("令和", 1, 5, 1).unwrap().ymd());
    /// assert!(matches!(
    ///     table.to_gregorian_strict("令和", 1, 4, 30),
    ///     Err(WarekiError::InvalidDate(DateFault::OutsideEra { .. }))
    /// ));
    /// assert!(table.to_gregorian_strict("平成", 31, 5, 1).is_err());
    /// ```
    pub fn to_gregorian_strict(
        &self,
        reference: &str,
        era_year: u32,
        month: u32,
        day: u32,
    ) -> Result<GregorianDate, WarekiError> {
        self.resolve(reference)
            .and_then(|era| {
                let date = compose(era, era_year, month, day)?;
                let before_start = date < era.start;
                let after_end = self.next_after(era).is_some_and(|next| date >= next.start);
                if before_start || after_end {
                    return Err(DateFault::OutsideEra {
                        era: era.name.clone(),
                        date,
                    }
                    .into());
                }
                Ok(date)
            })
            .inspect_err(|e| {
                tracing::trace!(reference, era_year, month, day, error = %e, "rejected wareki date")
            })
    }

    fn resolve(&self, reference: &str) -> Result<&EraRecord, WarekiError> {
        self.lookup_by_reference(reference)
            .ok_or_else(|| WarekiError::UnknownEra {
                reference: reference.to_owned(),
            })
    }
}

fn compose(
    era: &EraRecord,
    era_year: u32,
    month: u32,
    day: u32,
) -> Result<GregorianDate, WarekiError> {
    if era_year < 1 {
        return Err(DateFault::EraYearNotPositive.into());
    }
    let year = i32::try_from(era_year)
        .ok()
        .and_then(|y| era.start.year().checked_add(y - 1))
        .ok_or(DateFault::YearOutOfRange)?;
    Ok(GregorianDate::new(year, month, day)?)
}

/// 組み込み元号表で西暦年月日を和暦（元号・元号年）に変換する。
///
/// # 用例
///
/// ```
/// use wareki::{WarekiError, gregorian_to_wareki};
///
/// let w = gregorian_to_wareki(1989, 1, 8).unwrap();
/// assert_eq!(("平成", 1), (w.era_name.as_str(), w.era_year));
///
/// assert!(matches!(
///     gregorian_to_wareki(1868, 1, 24),
///     Err(WarekiError::UnsupportedEra { .. })
/// ));
/// ```
pub fn gregorian_to_wareki(year: i32, month: u32, day: u32) -> Result<Wareki, WarekiError> {
    EraTable::builtin().to_wareki(year, month, day)
}

/// 組み込み元号表で和暦を西暦日付に変換する。`era` は元号名・略号・ラテン文字略号のいずれか。
///
/// # 用例
///
/// ```
/// use wareki::wareki_to_gregorian;
///
/// for era in ["令和", "令", "r", "R"] {
///     assert_eq!((2026, 2, 23), wareki_to_gregorian(era, 8, 2, 23).unwrap().ymd());
/// }
/// ```
pub fn wareki_to_gregorian(
    era: &str,
    era_year: u32,
    month: u32,
    day: u32,
) -> Result<GregorianDate, WarekiError> {
    EraTable::builtin().to_gregorian(era, era_year, month, day)
}

/// [`wareki_to_gregorian`] の厳密版。元号の期間外の日付を拒否する。
pub fn wareki_to_gregorian_strict(
    era: &str,
    era_year: u32,
    month: u32,
    day: u32,
) -> Result<GregorianDate, WarekiError> {
    EraTable::builtin().to_gregorian_strict(era, era_year, month, day)
}
