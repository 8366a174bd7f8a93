//! 导出格式与提交结果

use regex::Regex;
use serde::Deserialize;

/// 导出文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Excel];

    /// `/export/{id}/{format}` 中的路径段
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "xlsx",
        }
    }

    /// 响应头未给出文件名时使用的默认文件名
    pub fn default_filename(self, document_id: &str) -> String {
        format!("summary_{}.{}", document_id, self.extension())
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "excel" | "xlsx" => Some(ExportFormat::Excel),
            _ => None,
        }
    }

    /// 解析逗号分隔的格式列表，忽略无法识别的项
    pub fn parse_list(value: &str) -> Vec<Self> {
        let mut formats = Vec::new();
        for format in value.split(',').filter_map(Self::parse) {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `/export` 接口返回的原始内容
#[derive(Debug, Clone, Default)]
pub struct ExportResponse {
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ExportResponse {
    /// 优先使用 content-disposition 中的文件名
    pub fn filename(&self, document_id: &str, format: ExportFormat) -> String {
        self.content_disposition
            .as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| format.default_filename(document_id))
    }
}

/// 从 `content-disposition` 头中提取 `filename="..."`
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let re = Regex::new(r#"filename="(.+)""#).ok()?;
    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 两阶段提交成功后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub document_id: String,
}

/// `/save_summary` 响应体
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSummaryResponse {
    pub pdf_id: Option<String>,
    #[serde(default)]
    pub summary_id: Option<String>,
}
