//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用编排
//! - 管理应用生命周期（初始化、运行）
//! - 加载公司信息与 PDF 文件
//! - 输出全局统计信息
//!
//! ### `upload_orchestrator` - 两阶段提交
//! - 持有文件批次与公司信息
//! - process → save_summary，报告进度
//! - 单一状态值：Idle / Submitting / Done / Failed
//!
//! ### `export_downloader` - 导出下载
//! - 按格式下载导出文件，各格式独立报错
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! upload_orchestrator / export_downloader
//!     ↓
//! validation / models (能力层)
//!     ↓
//! clients::SummaryApi (基础设施：HTTP)
//! ```

pub mod app;
pub mod export_downloader;
pub mod upload_orchestrator;

// 重新导出主要类型
pub use app::App;
pub use export_downloader::{DownloadOutcome, ExportDownloader};
pub use upload_orchestrator::{UploadOrchestrator, UploadState};
