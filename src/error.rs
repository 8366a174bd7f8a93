use thiserror::Error;

use crate::models::ExportFormat;
use crate::validation::FormErrors;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 上传提交错误
    #[error("提交错误: {0}")]
    Submission(#[from] SubmissionError),
    /// 导出下载错误
    #[error("下载错误: {0}")]
    Download(#[from] DownloadError),
    /// 表单校验未通过
    #[error("表单错误: {0}")]
    Form(#[from] FormErrors),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 业务逻辑错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx 状态
    #[error("API返回错误状态 ({endpoint}): {status} {status_text}")]
    BadStatus {
        endpoint: String,
        status: u16,
        status_text: String,
    },
    /// 响应缺少必需字段
    #[error("API响应缺少字段 {field} ({endpoint})")]
    MissingField { endpoint: String, field: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 提交所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    /// 第一阶段：上传并处理 PDF
    Process,
    /// 第二阶段：保存摘要
    Persist,
}

impl std::fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStage::Process => write!(f, "process"),
            SubmissionStage::Persist => write!(f, "save_summary"),
        }
    }
}

/// 两阶段提交错误
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// `/process` 返回非成功状态
    #[error("Processing failed: {status_text} ({status})")]
    ProcessingFailed { status: u16, status_text: String },
    /// `/save_summary` 返回非成功状态
    #[error("Saving failed: {status_text} ({status})")]
    SavingFailed { status: u16, status_text: String },
    /// 网络层或解析失败
    #[error("{stage} 阶段失败: {source}")]
    Request {
        stage: SubmissionStage,
        #[source]
        source: ApiError,
    },
}

impl SubmissionError {
    /// 把客户端错误归类到对应阶段
    pub fn at_stage(stage: SubmissionStage, err: ApiError) -> Self {
        match (stage, err) {
            (SubmissionStage::Process, ApiError::BadStatus { status, status_text, .. }) => {
                SubmissionError::ProcessingFailed { status, status_text }
            }
            (SubmissionStage::Persist, ApiError::BadStatus { status, status_text, .. }) => {
                SubmissionError::SavingFailed { status, status_text }
            }
            (stage, source) => SubmissionError::Request { stage, source },
        }
    }

    /// 失败发生的阶段
    pub fn stage(&self) -> SubmissionStage {
        match self {
            SubmissionError::ProcessingFailed { .. } => SubmissionStage::Process,
            SubmissionError::SavingFailed { .. } => SubmissionStage::Persist,
            SubmissionError::Request { stage, .. } => *stage,
        }
    }

    /// 面向用户的通知文案
    pub fn user_message(&self) -> &'static str {
        "Error processing files. Please try again."
    }
}

/// 导出下载错误（每种格式相互独立）
#[derive(Debug, Error)]
pub enum DownloadError {
    /// 请求导出失败
    #[error("导出 {format} 失败: {source}")]
    Request {
        format: ExportFormat,
        #[source]
        source: ApiError,
    },
    /// 写入本地文件失败
    #[error("保存 {format} 到 {path} 失败: {source}")]
    WriteFailed {
        format: ExportFormat,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// 失败的导出格式
    pub fn format(&self) -> ExportFormat {
        match self {
            DownloadError::Request { format, .. } | DownloadError::WriteFailed { format, .. } => {
                *format
            }
        }
    }

    /// 面向用户的通知文案，包含失败的格式名
    pub fn user_message(&self) -> String {
        format!(
            "Failed to download {} file. Please try again.",
            self.format().as_str().to_uppercase()
        )
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 业务逻辑错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessError {
    /// 提交进行中，批次已冻结
    #[error("提交进行中，无法修改文件列表")]
    SubmissionInProgress,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 服务地址无法解析
    #[error("无效的服务地址 '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// HTTP 客户端构建失败
    #[error("HTTP客户端初始化失败: {0}")]
    HttpClient(String),
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonParseFailed {
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(err.into())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建字段缺失错误
    pub fn missing_field(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        ApiError::MissingField {
            endpoint: endpoint.into(),
            field: field.into(),
        }
    }
}

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
