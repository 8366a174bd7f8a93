//! # CERSAI Intake
//!
//! CERSAI 报告处理服务的客户端：校验公司信息、上传 PDF、下载汇总结果
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 连接，只暴露能力
//! - `SummaryApi` - 处理服务接口（process / save_summary / export）
//! - `SummaryClient` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Validation / Models）
//! - `validation/` - 字段校验引擎，纯函数
//! - `CompanyForm` - 表单状态（编辑清除错误、提交全量校验）
//! - `models/` - 公司信息、上传批次、导出格式以及文件加载
//!
//! ### ③ 流程层（Workflow）
//! - `UploadOrchestrator` - 两阶段提交状态机（process → save_summary）
//! - `ExportDownloader` - 导出文件下载，各格式互不影响
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期：加载 → 校验 → 提交 → 下载 → 统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod validation;

// 重新导出常用类型
pub use clients::{SummaryApi, SummaryClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CompanyMetadata, ExportFormat, FieldId, SubmissionResult, UploadBatch, UploadFile};
pub use orchestrator::{App, ExportDownloader, UploadOrchestrator, UploadState};
pub use validation::{validate, CompanyForm, FieldError, Validated};
