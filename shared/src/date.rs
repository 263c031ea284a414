//! 日期工具
//!
//! - 表单里的日期是 `YYYY-MM-DD` 字符串（`<input type="date">` 的值）
//! - 服务端的 `createdAt` 是 RFC 3339 时间戳，展示时拆成日期和时间两段

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// `<input type="date">` 的取值格式
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";
/// 列表中展示的日期格式
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// 列表中展示的时间格式
pub const DISPLAY_TIME_FORMAT: &str = "%I:%M:%S %p";

/// 解析表单日期，空串或非法值返回 None
pub fn parse_form_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, FORM_DATE_FORMAT).ok()
}

/// 把时间戳拆成 (日期, 时间) 两段展示文本
///
/// 时区由调用方决定：浏览器里传 `chrono::Local`，测试里传 `Utc`。
pub fn split_timestamp<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    let local = ts.with_timezone(tz);
    (
        local.format(DISPLAY_DATE_FORMAT).to_string(),
        local.format(DISPLAY_TIME_FORMAT).to_string(),
    )
}

/// 闭区间日期范围，任一端可以不设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// 由两个表单输入构造，起止颠倒时自动交换
    pub fn from_inputs(from: &str, to: &str) -> Self {
        match (parse_form_date(from), parse_form_date(to)) {
            (Some(a), Some(b)) if a > b => Self::new(Some(b), Some(a)),
            (a, b) => Self::new(a, b),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_form_dates() {
        assert_eq!(parse_form_date("2025-03-04"), Some(d(2025, 3, 4)));
        assert_eq!(parse_form_date(" "), None);
        assert_eq!(parse_form_date("04/03/2025"), None);
    }

    #[test]
    fn splits_timestamp_into_date_and_time() {
        let ts: DateTime<Utc> = "2025-03-01T15:04:05Z".parse().unwrap();
        let (date, time) = split_timestamp(&ts, &Utc);
        assert_eq!(date, "01/03/2025");
        assert_eq!(time, "03:04:05 PM");
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(Some(d(2025, 1, 10)), Some(d(2025, 1, 12)));
        assert!(range.contains(d(2025, 1, 10)));
        assert!(range.contains(d(2025, 1, 12)));
        assert!(!range.contains(d(2025, 1, 9)));
        assert!(!range.contains(d(2025, 1, 13)));
    }

    #[test]
    fn open_ended_ranges() {
        let since = DateRange::from_inputs("2025-01-10", "");
        assert!(since.contains(d(2030, 1, 1)));
        assert!(!since.contains(d(2025, 1, 9)));
        assert!(DateRange::default().is_unbounded());
    }

    #[test]
    fn reversed_inputs_are_swapped() {
        let range = DateRange::from_inputs("2025-02-01", "2025-01-01");
        assert_eq!(range.from, Some(d(2025, 1, 1)));
        assert_eq!(range.to, Some(d(2025, 2, 1)));
    }
}
