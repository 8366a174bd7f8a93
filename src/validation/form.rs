//! 公司信息表单状态
//!
//! 保存每个字段转换后的值和待显示的错误。编辑某个字段时立即清除该字段的错误，
//! 提交时一次性校验全部字段。

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::models::{CompanyMetadata, FieldId};
use crate::validation::rules::{self, FieldError};

/// 表单提交失败时的全部字段错误（每个字段最多一条）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 个字段未通过校验", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// 公司信息表单
#[derive(Debug, Clone, Default)]
pub struct CompanyForm {
    values: HashMap<FieldId, String>,
    errors: HashMap<FieldId, FieldError>,
}

impl CompanyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 处理一次输入，返回转换后的值
    pub fn input(&mut self, field: FieldId, raw: &str) -> &str {
        let value = rules::transform(field, raw);
        if self.errors.remove(&field).is_some() {
            debug!("字段 {} 已编辑，清除错误提示", field);
        }
        self.values.insert(field, value);
        self.value(field)
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// 当前显示在字段旁的错误
    pub fn error(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 校验全部字段，全部通过时返回不可变的公司信息
    pub fn submit(&mut self) -> Result<CompanyMetadata, FormErrors> {
        self.errors.clear();
        let mut errors = Vec::new();

        for field in FieldId::ALL {
            if let Some(error) = rules::check(field, self.value(field)) {
                self.errors.insert(field, error);
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(CompanyMetadata::from_validated(|field| {
                self.value(field).to_string()
            }))
        } else {
            Err(FormErrors { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CompanyForm {
        let mut form = CompanyForm::new();
        form.input(FieldId::CompanyName, "Acme Widgets Pvt Ltd");
        form.input(FieldId::CinNumber, "u12345ab1234ptc567890");
        form.input(FieldId::SearchReferenceId, "200012345678");
        form.input(FieldId::DateOfIncorporation, "15081947");
        form.input(FieldId::Udin, "23123456ABCDEF7890");
        form.input(FieldId::RegisteredOffice, "Nariman Point, Mumbai");
        form
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let mut form = CompanyForm::new();
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), FieldId::ALL.len());
        for field in FieldId::ALL {
            assert!(form.error(field).is_some(), "{} 应该有错误", field);
        }
        assert_eq!(
            errors.get(FieldId::Udin).unwrap().message(),
            "UDIN is required"
        );
    }

    #[test]
    fn test_editing_clears_only_that_field() {
        let mut form = CompanyForm::new();
        let _ = form.submit();

        form.input(FieldId::CinNumber, "x");
        assert!(form.error(FieldId::CinNumber).is_none());
        assert!(form.error(FieldId::Udin).is_some());

        // 即使新输入仍然无效，也要等到下次提交才重新显示
        form.input(FieldId::DateOfIncorporation, "3102");
        assert!(form.error(FieldId::DateOfIncorporation).is_none());
    }

    #[test]
    fn test_input_returns_transformed_value() {
        let mut form = CompanyForm::new();
        assert_eq!(form.input(FieldId::DateOfIncorporation, "150819"), "15.08.19");
        assert_eq!(form.input(FieldId::SearchReferenceId, "12 34"), "1234");
        assert_eq!(form.value(FieldId::SearchReferenceId), "1234");
    }

    #[test]
    fn test_valid_form_yields_metadata() {
        let mut form = filled_form();
        let metadata = form.submit().unwrap();
        assert_eq!(metadata.cin_number(), "U12345AB1234PTC567890");
        assert_eq!(metadata.get(FieldId::DateOfIncorporation), "15.08.1947");
        assert!(!form.has_errors());
    }

    #[test]
    fn test_single_invalid_field_blocks_submit() {
        let mut form = filled_form();
        form.input(FieldId::DateOfIncorporation, "31.02.2024");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FieldId::DateOfIncorporation).unwrap().message(),
            "Please enter a valid date"
        );
    }
}
