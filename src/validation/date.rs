//! 成立日期的输入格式化与日历校验

use chrono::{Datelike, NaiveDate};

/// DDMMYYYY 共 8 位数字
pub const MAX_DATE_DIGITS: usize = 8;

/// 边输入边格式化：只保留数字，在第 3 位和第 5 位数字前插入 `.`
///
/// 超过 8 位的数字会被截断，因此对已格式化的值重复调用结果不变。
pub fn format_date_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DATE_DIGITS)
        .collect();

    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}.{}", &digits[..2], &digits[2..]),
        _ => format!("{}.{}.{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// 是否完整匹配 `DD.MM.YYYY`
pub fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}

/// 解析为真实存在的日期
///
/// 构造出的日期必须与输入的日、月、年完全一致，31.02.2024 这类溢出日期
/// 不会被顺延到下个月。年份小于 100 同样视为无效。
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    if !is_date_shaped(value) {
        return None;
    }

    let day: u32 = value[0..2].parse().ok()?;
    let month: u32 = value[3..5].parse().ok()?;
    let year: i32 = value[6..10].parse().ok()?;

    if year < 100 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date.day() != day || date.month() != month || date.year() != year {
        return None;
    }
    Some(date)
}
