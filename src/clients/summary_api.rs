//! 处理服务接口抽象
//!
//! 编排层只依赖这个 trait，测试中以内存实现替换真实的 HTTP 客户端。

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{CompanyMetadata, ExportFormat, ExportResponse, SaveSummaryResponse, UploadFile};

pub const PROCESS_ENDPOINT: &str = "/process";
pub const SAVE_SUMMARY_ENDPOINT: &str = "/save_summary";
pub const EXPORT_ENDPOINT: &str = "/export";
pub const GET_SUMMARY_ENDPOINT: &str = "/get_summary";
pub const HEALTH_ENDPOINT: &str = "/health";

/// `/save_summary` 请求体
#[derive(Debug, Clone, Serialize)]
pub struct SaveSummaryRequest<'a> {
    /// 所有原始文件名，以 ", " 连接
    pub filename: String,
    /// `/process` 返回的处理结果
    pub summary: &'a Value,
    #[serde(rename = "companyDetails")]
    pub company_details: Option<&'a CompanyMetadata>,
}

/// 处理服务的全部能力
pub trait SummaryApi: Send + Sync {
    /// 上传 PDF 及公司信息，返回处理结果
    fn process(
        &self,
        files: &[UploadFile],
        company_details: Option<&CompanyMetadata>,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// 保存处理结果，返回文档ID
    fn save_summary(
        &self,
        request: &SaveSummaryRequest<'_>,
    ) -> impl Future<Output = Result<SaveSummaryResponse, ApiError>> + Send;

    /// 下载指定格式的导出文件
    fn export(
        &self,
        document_id: &str,
        format: ExportFormat,
    ) -> impl Future<Output = Result<ExportResponse, ApiError>> + Send;

    /// 读取已保存的摘要
    fn get_summary(&self, document_id: &str) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// 服务健康检查
    fn health(&self) -> impl Future<Output = Result<Value, ApiError>> + Send;
}
