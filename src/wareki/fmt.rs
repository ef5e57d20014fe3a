//! 和暦の書式化

use super::{Wareki, WarekiDate};

/// 漢数字、第 `1..=9` 項がそれぞれ「一」から「九」。第 0 項は空文字列。
pub const NUM_KANJI: &[&str] = &["", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 元号年の表記。元年は「元」、それ以外は算用数字。
///
/// # 用例
///
/// ```
/// use wareki::wareki::fmt;
///
/// assert_eq!("元", fmt::era_year(1));
/// assert_eq!("31", fmt::era_year(31));
/// ```
pub fn era_year(year: u32) -> String {
    match year {
        1 => "元".to_owned(),
        _ => year.to_string(),
    }
}

/// 漢数字表記（位取りに十・百・千を用いる）。`1..=9999` 以外は `None`。
///
/// # 用例
///
/// ```
/// use wareki::wareki::fmt;
///
/// assert_eq!(Some("六十四".to_owned()), fmt::number_kanji(64));
/// assert_eq!(Some("十".to_owned()), fmt::number_kanji(10));
/// assert_eq!(Some("二千十九".to_owned()), fmt::number_kanji(2019));
/// assert_eq!(None, fmt::number_kanji(0));
/// ```
pub fn number_kanji(n: u32) -> Option<String> {
    if !(1..=9999).contains(&n) {
        return None;
    }
    let mut rt = String::new();
    for (unit, place) in [(1000, "千"), (100, "百"), (10, "十")] {
        let digit = (n / unit % 10) as usize;
        match digit {
            0 => {}
            1 => rt += place,
            _ => {
                rt += NUM_KANJI[digit];
                rt += place;
            }
        }
    }
    rt += NUM_KANJI[(n % 10) as usize];
    Some(rt)
}

/// 漢数字による元号年表記。元年は「元」。
///
/// # 用例
///
/// ```
/// use wareki::gregorian_to_wareki;
/// use wareki::wareki::fmt;
///
/// let w = gregorian_to_wareki(2026, 2, 23).unwrap();
/// assert_eq!(Some("令和八年".to_owned()), fmt::wareki_kanji(&w));
/// ```
pub fn wareki_kanji(w: &Wareki) -> Option<String> {
    let year = match w.era_year {
        1 => "元".to_owned(),
        y => number_kanji(y)?,
    };
    Some(format!("{}{}年", w.era_name, year))
}

/// 漢数字による日付表記（「令和八年二月二十三日」）。数値が表記範囲外なら `None`。
pub fn date_kanji(date: &WarekiDate) -> Option<String> {
    Some(format!(
        "{}{}月{}日",
        wareki_kanji(&date.wareki())?,
        number_kanji(date.month)?,
        number_kanji(date.day)?
    ))
}
