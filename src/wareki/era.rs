//! 元号表
//!
//! 組み込みの元号表は `data/eras.txt` から初回使用時に一度だけ読み込まれ、以後は変更されない。
//! 別の元号表（新元号の追加など）が必要な場合は [`EraTable::new`] や [`EraTable::extended`]
//! で新たに構築する。

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::date::GregorianDate;
use crate::error::{DateFault, TableError};

/// 一つの元号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EraRecord {
    /// 元号名（「令和」など）
    pub name: String,
    /// 一文字の略号（「令」など）
    pub abbreviation: String,
    /// ラテン文字略号。大文字小文字を区別せず照合する（`R`、`Reiwa` など）
    pub latin_codes: Vec<String>,
    /// 施行初日（当日を含む）
    pub start: GregorianDate,
}

impl EraRecord {
    /// 元号名・略号・ラテン文字略号をすべて列挙する。
    fn designators(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.abbreviation.as_str()]
            .into_iter()
            .chain(self.latin_codes.iter().map(String::as_str))
    }
}

/// 施行日順に並んだ元号の表。
///
/// 構築時に以下を検証済み：
///
/// - 一つ以上の元号を含む
/// - 施行日が厳密に増加する
/// - 元号名・略号・ラテン文字略号は、大文字小文字を区別せずとも全元号を通じて重複しない
///
/// 元号 *i* の期間は `[start_i, start_{i+1})`、最後の元号は終わりを持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EraRecord>", into = "Vec<EraRecord>")]
pub struct EraTable {
    eras: Vec<EraRecord>,
}

static BUILTIN: OnceLock<EraTable> = OnceLock::new();

impl EraTable {
    /// 元号表を検証して構築する。
    pub fn new(eras: Vec<EraRecord>) -> Result<Self, TableError> {
        validate(&eras)?;
        if let Some(latest) = eras.last() {
            tracing::debug!(
                eras = eras.len(),
                latest = %latest.name,
                since = %latest.start,
                "era table built"
            );
        }
        Ok(Self { eras })
    }

    /// 明治以降の組み込み元号表。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::EraTable;
    ///
    /// let table = EraTable::builtin();
    /// assert_eq!("明治", table.earliest().name);
    /// ```
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            let eras = parse_raw_data()
                .unwrap_or_else(|e| panic!("error parsing era data: {:?}", e));
            Self::new(eras).unwrap_or_else(|e| panic!("invalid era data: {e}"))
        })
    }

    /// 末尾に元号を一つ加えた新しい表を返す。`self` は変更しない。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::{EraRecord, EraTable};
    ///
    /// let next = EraRecord {
    ///     name: "新元".to_owned(),
    ///     abbreviation: "新".to_owned(),
    ///     latin_codes: vec!["X".to_owned()],
    ///     start: "2100-01-01".parse().unwrap(),
    /// };
    /// let table = EraTable::builtin().extended(next).unwrap();
    /// assert_eq!("新元", table.latest().name);
    /// assert_eq!(5, EraTable::builtin().eras().len());
    /// ```
    pub fn extended(&self, era: EraRecord) -> Result<Self, TableError> {
        let mut eras = self.eras.clone();
        eras.push(era);
        Self::new(eras)
    }

    /// 全元号（古い順）
    pub fn eras(&self) -> &[EraRecord] {
        &self.eras
    }

    /// 最古の元号。これより前の日付は扱わない。
    pub fn earliest(&self) -> &EraRecord {
        &self.eras[0]
    }

    /// 最新の元号
    pub fn latest(&self) -> &EraRecord {
        &self.eras[self.eras.len() - 1]
    }

    /// 指定日に施行中の元号を取得する。最古の元号より前なら `None`。
    pub fn lookup_by_date(&self, date: GregorianDate) -> Option<&EraRecord> {
        let idx = self.eras.partition_point(|era| era.start <= date);
        idx.checked_sub(1).map(|i| &self.eras[i])
    }

    /// 元号名・略号・ラテン文字略号から元号を取得する。
    ///
    /// 照合順は元号名、略号、ラテン文字略号（大文字小文字を区別しない）。構築時の検証により、
    /// 一致する元号は高々一つ。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::EraTable;
    ///
    /// let table = EraTable::builtin();
    /// for reference in ["平成", "平", "H", "h", "heisei"] {
    ///     assert_eq!("平成", table.lookup_by_reference(reference).unwrap().name);
    /// }
    /// assert!(table.lookup_by_reference("慶応").is_none());
    /// ```
    pub fn lookup_by_reference(&self, reference: &str) -> Option<&EraRecord> {
        self.eras
            .iter()
            .find(|era| era.name == reference)
            .or_else(|| self.eras.iter().find(|era| era.abbreviation == reference))
            .or_else(|| {
                self.eras.iter().find(|era| {
                    era.latin_codes
                        .iter()
                        .any(|code| code.eq_ignore_ascii_case(reference))
                })
            })
    }

    /// `era` の次の元号。最新の元号なら `None`。
    pub fn next_after(&self, era: &EraRecord) -> Option<&EraRecord> {
        self.eras.iter().find(|e| e.start > era.start)
    }

    /// `era` の最終日（次の元号の施行日の前日）。最新の元号なら `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::EraTable;
    ///
    /// let table = EraTable::builtin();
    /// let showa = table.lookup_by_reference("昭和").unwrap();
    /// assert_eq!("1989-01-07", table.last_day(showa).unwrap().to_string());
    /// ```
    pub fn last_day(&self, era: &EraRecord) -> Option<GregorianDate> {
        self.next_after(era)?.start.checked_add_days(-1)
    }

    /// `era` の最終年（元号年）。最新の元号なら `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use wareki::EraTable;
    ///
    /// let table = EraTable::builtin();
    /// let showa = table.lookup_by_reference("S").unwrap();
    /// assert_eq!(Some(64), table.max_era_year(showa));
    /// ```
    pub fn max_era_year(&self, era: &EraRecord) -> Option<u32> {
        let last = self.last_day(era)?;
        u32::try_from(i64::from(last.year()) - i64::from(era.start.year()) + 1).ok()
    }
}

impl TryFrom<Vec<EraRecord>> for EraTable {
    type Error = TableError;
    fn try_from(eras: Vec<EraRecord>) -> Result<Self, Self::Error> {
        Self::new(eras)
    }
}

impl From<EraTable> for Vec<EraRecord> {
    fn from(table: EraTable) -> Self {
        table.eras
    }
}

fn validate(eras: &[EraRecord]) -> Result<(), TableError> {
    use TableError::*;

    if eras.is_empty() {
        return Err(Empty);
    }
    for pair in eras.windows(2) {
        let (previous, era) = (&pair[0], &pair[1]);
        if era.start <= previous.start {
            return Err(NotIncreasing {
                era: era.name.clone(),
                start: era.start,
                previous: previous.name.clone(),
                previous_start: previous.start,
            });
        }
    }

    // 全識別子を小文字化して照合し、大文字小文字違いでの衝突も曖昧とみなす
    let mut owners: HashMap<String, usize> = HashMap::new();
    for (index, era) in eras.iter().enumerate() {
        if era.name.is_empty() || era.abbreviation.is_empty() {
            return Err(EmptyDesignator { index });
        }
        if era.latin_codes.is_empty() {
            return Err(MissingLatinCode {
                era: era.name.clone(),
            });
        }
        if let Some(code) = era
            .latin_codes
            .iter()
            .find(|code| code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(NonLatinCode {
                era: era.name.clone(),
                code: code.clone(),
            });
        }
        for designator in era.designators() {
            let owner = *owners
                .entry(designator.to_ascii_lowercase())
                .or_insert(index);
            if owner != index {
                return Err(DuplicateDesignator {
                    designator: designator.to_owned(),
                    first: eras[owner].name.clone(),
                    second: era.name.clone(),
                });
            }
        }
    }
    Ok(())
}

static RAW_DATA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/eras.txt"));

fn parse_raw_data() -> Result<Vec<EraRecord>, RawDataError> {
    use ErrorType::*;

    let mut res = Vec::new();
    for (line_num, line) in (1usize..).zip(RAW_DATA.lines()) {
        let line = line.split('#').next().unwrap_or_default();
        let mut it = line.split_whitespace();
        let Some(name) = it.next() else {
            continue;
        };
        let abbreviation = it
            .next()
            .ok_or_else(|| RawDataError::new(line_num, 2, MissingField))?;
        let start = it
            .next()
            .ok_or_else(|| RawDataError::new(line_num, 3, MissingField))?
            .parse()
            .map_err(|e| RawDataError::new(line_num, 3, InvalidDate(e)))?;
        let latin_codes: Vec<String> = it.map(str::to_owned).collect();
        if latin_codes.is_empty() {
            return Err(RawDataError::new(line_num, 4, MissingField));
        }
        res.push(EraRecord {
            name: name.to_owned(),
            abbreviation: abbreviation.to_owned(),
            latin_codes,
            start,
        });
    }
    Ok(res)
}

#[derive(Debug)]
#[allow(dead_code)]
struct RawDataError {
    pub line_num: usize,
    pub field_num: usize,
    pub reason: ErrorType,
}

impl RawDataError {
    fn new(line_num: usize, field_num: usize, reason: ErrorType) -> Self {
        Self {
            line_num,
            field_num,
            reason,
        }
    }
}

#[derive(Debug)]
#[allow(dead_code)]
enum ErrorType {
    InvalidDate(DateFault),
    MissingField,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, abbreviation: &str, codes: &[&str], start: &str) -> EraRecord {
        EraRecord {
            name: name.to_owned(),
            abbreviation: abbreviation.to_owned(),
            latin_codes: codes.iter().map(|&c| c.to_owned()).collect(),
            start: start.parse().unwrap(),
        }
    }

    #[test]
    fn raw_data() {
        let eras = parse_raw_data().unwrap();
        let stds = [
            ("明治", "明", "1868-01-25", "M"),
            ("大正", "大", "1912-07-30", "T"),
            ("昭和", "昭", "1926-12-25", "S"),
            ("平成", "平", "1989-01-08", "H"),
            ("令和", "令", "2019-05-01", "R"),
        ];
        assert_eq!(stds.len(), eras.len());
        for (std, era) in stds.iter().zip(&eras) {
            assert_eq!(
                (std.0, std.1, std.2.to_owned(), std.3),
                (
                    era.name.as_str(),
                    era.abbreviation.as_str(),
                    era.start.to_string(),
                    era.latin_codes[0].as_str()
                )
            );
        }
        validate(&eras).unwrap();
    }

    #[test]
    fn by_date() {
        let table = EraTable::builtin();
        for ((y, m, d), std) in [
            ((1868, 1, 24), None),
            ((1868, 1, 25), Some("明治")),
            ((1912, 7, 29), Some("明治")),
            ((1912, 7, 30), Some("大正")),
            ((1926, 12, 24), Some("大正")),
            ((1926, 12, 25), Some("昭和")),
            ((1989, 1, 7), Some("昭和")),
            ((1989, 1, 8), Some("平成")),
            ((2019, 4, 30), Some("平成")),
            ((2019, 5, 1), Some("令和")),
            ((9999, 12, 31), Some("令和")),
        ] {
            let date = GregorianDate::new(y, m, d).unwrap();
            assert_eq!(
                std,
                table.lookup_by_date(date).map(|era| era.name.as_str()),
                "{date}"
            );
        }
    }

    #[test]
    fn by_reference() {
        let table = EraTable::builtin();
        for era in table.eras() {
            let mut references = vec![era.name.clone(), era.abbreviation.clone()];
            for code in &era.latin_codes {
                references.push(code.clone());
                references.push(code.to_ascii_lowercase());
                references.push(code.to_ascii_uppercase());
            }
            for reference in references {
                assert_eq!(Some(era), table.lookup_by_reference(&reference), "{reference}");
            }
        }
        for reference in ["", "慶応", "Keio", "令和 ", "ｒ", "X"] {
            assert_eq!(None, table.lookup_by_reference(reference), "{reference:?}");
        }
    }

    #[test]
    fn ranges() {
        let table = EraTable::builtin();
        let stds = [
            ("明治", Some("1912-07-29"), Some(45)),
            ("大正", Some("1926-12-24"), Some(15)),
            ("昭和", Some("1989-01-07"), Some(64)),
            ("平成", Some("2019-04-30"), Some(31)),
            ("令和", None, None),
        ];
        for (name, last, max) in stds {
            let era = table.lookup_by_reference(name).unwrap();
            assert_eq!(
                last,
                table.last_day(era).map(|d| d.to_string()).as_deref(),
                "{name}"
            );
            assert_eq!(max, table.max_era_year(era), "{name}");
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Err(TableError::Empty), EraTable::new(vec![]));
    }

    #[test]
    fn rejects_unordered() {
        let eras = vec![
            record("甲", "甲", &["A"], "2000-01-01"),
            record("乙", "乙", &["B"], "2000-01-01"),
        ];
        assert!(matches!(
            EraTable::new(eras),
            Err(TableError::NotIncreasing { era, .. }) if era == "乙"
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let latin = EraTable::builtin().extended(record("新元", "新", &["s"], "2100-01-01"));
        assert_eq!(
            Err(TableError::DuplicateDesignator {
                designator: "s".to_owned(),
                first: "昭和".to_owned(),
                second: "新元".to_owned(),
            }),
            latin
        );
        let native = EraTable::builtin().extended(record("新元", "令", &["X"], "2100-01-01"));
        assert!(matches!(
            native,
            Err(TableError::DuplicateDesignator { first, .. }) if first == "令和"
        ));
        // 同一元号内の重複は曖昧ではない
        let own = EraTable::new(vec![record("甲", "甲", &["A", "a"], "2000-01-01")]);
        assert!(own.is_ok());
    }

    #[test]
    fn rejects_bad_codes() {
        assert_eq!(
            Err(TableError::MissingLatinCode {
                era: "甲".to_owned()
            }),
            EraTable::new(vec![record("甲", "甲", &[], "2000-01-01")])
        );
        assert_eq!(
            Err(TableError::NonLatinCode {
                era: "甲".to_owned(),
                code: "Shōwa".to_owned()
            }),
            EraTable::new(vec![record("甲", "甲", &["Shōwa"], "2000-01-01")])
        );
        assert_eq!(
            Err(TableError::EmptyDesignator { index: 0 }),
            EraTable::new(vec![record("甲", "", &["A"], "2000-01-01")])
        );
    }

    #[test]
    fn extension_keeps_earlier_eras() {
        let table = EraTable::builtin()
            .extended(record("新元", "新", &["X"], "2100-01-01"))
            .unwrap();
        let reiwa = table.lookup_by_reference("令和").unwrap();
        assert_eq!("2099-12-31", table.last_day(reiwa).unwrap().to_string());
        let date = GregorianDate::new(2099, 12, 31).unwrap();
        assert_eq!("令和", table.lookup_by_date(date).unwrap().name);
        let date = GregorianDate::new(2100, 1, 1).unwrap();
        assert_eq!("新元", table.lookup_by_date(date).unwrap().name);
        for era in EraTable::builtin().eras() {
            assert_eq!(Some(era), table.lookup_by_reference(&era.name));
        }
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(EraTable::builtin()).unwrap();
        let table: EraTable = serde_json::from_str(&json).unwrap();
        assert_eq!(EraTable::builtin(), &table);
    }

    #[test]
    fn serde_validates() {
        let json = r#"[
            {"name":"甲","abbreviation":"甲","latin_codes":["A"],"start":{"year":2000,"month":1,"day":1}},
            {"name":"乙","abbreviation":"乙","latin_codes":["a"],"start":{"year":2001,"month":1,"day":1}}
        ]"#;
        let err = serde_json::from_str::<EraTable>(json).unwrap_err();
        assert!(err.to_string().contains("designator"), "{err}");
    }
}
