//! 字段规则表
//!
//! 每个 [`FieldId`] 对应一条 `{ transform, validate }` 规则记录，
//! 通过穷尽的 `match` 分发，不存在默认分支。

use std::fmt;

use crate::models::FieldId;
use crate::validation::date::{format_date_input, is_date_shaped, parse_calendar_date};

pub const CIN_MAX_LEN: usize = 25;
pub const SEARCH_REFERENCE_ID_MAX_LEN: usize = 15;
pub const UDIN_MAX_LEN: usize = 20;

/// 校验失败的类别，按检查顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// 去除空白后为空
    Required,
    /// 超过最大长度
    TooLong { max: usize },
    /// 含有不允许的字符
    InvalidCharacters,
    /// 不符合 DD.MM.YYYY
    InvalidFormat,
    /// 日历上不存在的日期
    InvalidDate,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// 显示在字段旁边的提示文案
    pub fn message(&self) -> &'static str {
        use FieldErrorKind::*;
        match (self.field, self.kind) {
            (FieldId::CompanyName, _) => "Company name is required",
            (FieldId::RegisteredOffice, _) => "Registered office address is required",

            (FieldId::CinNumber, Required) => "CIN number is required",
            (FieldId::CinNumber, TooLong { .. }) => "CIN number must be ≤25 characters",
            (FieldId::CinNumber, _) => "CIN must contain only uppercase letters and digits",

            (FieldId::SearchReferenceId, Required) => "Search Reference ID is required",
            (FieldId::SearchReferenceId, TooLong { .. }) => "Search Reference ID must be ≤15 digits",
            (FieldId::SearchReferenceId, _) => "Search Reference ID must contain only numbers",

            (FieldId::DateOfIncorporation, Required) => "Date of incorporation is required",
            (FieldId::DateOfIncorporation, InvalidDate) => "Please enter a valid date",
            (FieldId::DateOfIncorporation, _) => "Date must follow DD.MM.YYYY format",

            (FieldId::Udin, Required) => "UDIN is required",
            (FieldId::Udin, TooLong { .. }) => "UDIN must be ≤20 characters",
            (FieldId::Udin, _) => "UDIN must contain only uppercase letters and digits",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FieldError {}

/// 规则记录
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub transform: fn(&str) -> String,
    pub validate: fn(&str) -> Option<FieldErrorKind>,
}

/// 字段到规则的固定映射
pub fn rule(field: FieldId) -> FieldRule {
    match field {
        FieldId::CompanyName | FieldId::RegisteredOffice => FieldRule {
            transform: str::to_string,
            validate: check_required,
        },
        FieldId::CinNumber => FieldRule {
            transform: str::to_uppercase,
            validate: check_cin,
        },
        FieldId::SearchReferenceId => FieldRule {
            transform: keep_digits,
            validate: check_search_reference_id,
        },
        FieldId::DateOfIncorporation => FieldRule {
            transform: format_date_input,
            validate: check_date,
        },
        FieldId::Udin => FieldRule {
            transform: str::to_uppercase,
            validate: check_udin,
        },
    }
}

/// 校验结果：转换后的值与首个失败的规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub value: String,
    pub error: Option<FieldError>,
}

/// 转换并校验一次输入
pub fn validate(field: FieldId, raw: &str) -> Validated {
    let value = transform(field, raw);
    let error = check(field, &value);
    Validated { value, error }
}

/// 只做转换
pub fn transform(field: FieldId, raw: &str) -> String {
    (rule(field).transform)(raw)
}

/// 只校验已转换的值
pub fn check(field: FieldId, value: &str) -> Option<FieldError> {
    (rule(field).validate)(value).map(|kind| FieldError { field, kind })
}

fn keep_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn check_required(value: &str) -> Option<FieldErrorKind> {
    value.trim().is_empty().then_some(FieldErrorKind::Required)
}

fn check_length(value: &str, max: usize) -> Option<FieldErrorKind> {
    (value.chars().count() > max).then_some(FieldErrorKind::TooLong { max })
}

fn check_upper_alnum(value: &str, max: usize) -> Option<FieldErrorKind> {
    check_required(value)
        .or_else(|| check_length(value, max))
        .or_else(|| {
            let ok = value
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
            (!ok).then_some(FieldErrorKind::InvalidCharacters)
        })
}

fn check_cin(value: &str) -> Option<FieldErrorKind> {
    check_upper_alnum(value, CIN_MAX_LEN)
}

fn check_udin(value: &str) -> Option<FieldErrorKind> {
    check_upper_alnum(value, UDIN_MAX_LEN)
}

fn check_search_reference_id(value: &str) -> Option<FieldErrorKind> {
    check_required(value)
        .or_else(|| check_length(value, SEARCH_REFERENCE_ID_MAX_LEN))
        .or_else(|| {
            let ok = value.chars().all(|c| c.is_ascii_digit());
            (!ok).then_some(FieldErrorKind::InvalidCharacters)
        })
}

fn check_date(value: &str) -> Option<FieldErrorKind> {
    if let Some(kind) = check_required(value) {
        return Some(kind);
    }
    if !is_date_shaped(value) {
        return Some(FieldErrorKind::InvalidFormat);
    }
    parse_calendar_date(value)
        .is_none()
        .then_some(FieldErrorKind::InvalidDate)
}
