//! 字段校验引擎
//!
//! - `rules` - 字段到 `{ transform, validate }` 规则的固定映射，纯函数
//! - `date` - 成立日期的边输入边格式化与日历校验
//! - `form` - 表单状态：保存转换后的值，编辑时清除错误，提交时全量校验

pub mod date;
pub mod form;
pub mod rules;

pub use form::{CompanyForm, FormErrors};
pub use rules::{check, transform, validate, FieldError, FieldErrorKind, Validated};
