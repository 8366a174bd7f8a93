use crate::error::{AppError, AppResult, FileError};
use crate::models::company::{CompanyDetailsInput, FieldId};
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// 从 TOML 文件加载未经校验的公司信息
pub async fn load_company_details(toml_file_path: &Path) -> AppResult<CompanyDetailsInput> {
    let path = toml_file_path.display().to_string();

    if !toml_file_path.exists() {
        return Err(FileError::NotFound { path }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path, e))?;

    parse_company_details(&content).map_err(|e| match e {
        AppError::File(FileError::TomlParseFailed { source, .. }) => {
            AppError::File(FileError::TomlParseFailed { path, source })
        }
        other => other,
    })
}

/// 解析 TOML 文本，同时支持 `[company]` 表和顶层字段两种写法
///
/// 存在 `company` 键时只解析该表，其中的类型错误直接返回。
pub fn parse_company_details(content: &str) -> AppResult<CompanyDetailsInput> {
    let mut table: toml::Table = toml::from_str(content)?;

    let fields = match table.remove("company") {
        Some(company) => company,
        None => toml::Value::Table(table),
    };

    if let Some(keys) = fields.as_table().map(|t| t.keys()) {
        for key in keys.filter(|key| FieldId::from_name(key.as_str()).is_none()) {
            warn!("⚠️ 忽略未知的公司信息字段: {}", key);
        }
    }

    let input: CompanyDetailsInput = fields.try_into()?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_table() {
        let input = parse_company_details(
            r#"
            [company]
            companyName = "Acme Widgets"
            udin = "ab12"
            "#,
        )
        .unwrap();
        assert_eq!(input.company_name, "Acme Widgets");
        assert_eq!(input.udin, "ab12");
    }

    #[test]
    fn test_parse_top_level_fields() {
        let input = parse_company_details(r#"cin_number = "L17110MH1973PLC019786""#).unwrap();
        assert_eq!(input.cin_number, "L17110MH1973PLC019786");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_company_details("companyName = ").unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_wrapped_table_type_error_is_reported() {
        let err = parse_company_details("[company]\ncompanyName = 5\ncinNumber = \"ABC\"\n")
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_company_must_be_a_table() {
        assert!(parse_company_details(r#"company = "Acme""#).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let input = parse_company_details(
            r#"
            [company]
            companyName = "Acme"
            gstNumber = "27AAAAA0000A1Z5"
            "#,
        )
        .unwrap();
        assert_eq!(input.company_name, "Acme");
    }

    #[tokio::test]
    async fn test_wrapped_type_error_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.toml");
        std::fs::write(&path, "[company]\nudin = [1, 2]\n").unwrap();

        let err = load_company_details(&path).await.unwrap_err();
        match err {
            AppError::File(FileError::TomlParseFailed { path: reported, .. }) => {
                assert!(reported.ends_with("company.toml"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_company_details(Path::new("does/not/exist.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
