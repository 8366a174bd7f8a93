//! 处理服务 HTTP 客户端
//!
//! 封装所有与处理服务相关的调用逻辑

use crate::clients::summary_api::{
    SaveSummaryRequest, SummaryApi, EXPORT_ENDPOINT, GET_SUMMARY_ENDPOINT, HEALTH_ENDPOINT,
    PROCESS_ENDPOINT, SAVE_SUMMARY_ENDPOINT,
};
use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::models::{CompanyMetadata, ExportFormat, ExportResponse, SaveSummaryResponse, UploadFile};
use crate::utils::logging::truncate_text;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

/// 处理服务客户端
#[derive(Clone)]
pub struct SummaryClient {
    http: reqwest::Client,
    base_url: String,
}

impl SummaryClient {
    /// 创建新的客户端，地址无法解析时报错
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Url::parse(&config.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: config.api_base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送 GET 请求并解析 JSON
    async fn get_json(&self, endpoint: &str, path: &str) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let response = ensure_success(endpoint, response).await?;
        read_json(endpoint, response).await
    }
}

impl SummaryApi for SummaryClient {
    async fn process(
        &self,
        files: &[UploadFile],
        company_details: Option<&CompanyMetadata>,
    ) -> Result<Value, ApiError> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.name().to_string())
                .mime_str("application/pdf")
                .map_err(|e| ApiError::request_failed(PROCESS_ENDPOINT, e))?;
            form = form.part("files[]", part);
        }

        if let Some(details) = company_details {
            form = form.text("companyDetails", serde_json::to_string(details)?);
        }

        debug!("上传 {} 个文件到 {}", files.len(), PROCESS_ENDPOINT);

        let response = self
            .http
            .post(self.url(PROCESS_ENDPOINT))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(PROCESS_ENDPOINT, e))?;

        let response = ensure_success(PROCESS_ENDPOINT, response).await?;
        read_json(PROCESS_ENDPOINT, response).await
    }

    async fn save_summary(
        &self,
        request: &SaveSummaryRequest<'_>,
    ) -> Result<SaveSummaryResponse, ApiError> {
        debug!("保存摘要 filename: {}", request.filename);

        let response = self
            .http
            .post(self.url(SAVE_SUMMARY_ENDPOINT))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(SAVE_SUMMARY_ENDPOINT, e))?;

        let response = ensure_success(SAVE_SUMMARY_ENDPOINT, response).await?;
        let value = read_json(SAVE_SUMMARY_ENDPOINT, response).await?;

        debug!("保存摘要结果: {}", value);

        Ok(serde_json::from_value(value)?)
    }

    async fn export(
        &self,
        document_id: &str,
        format: ExportFormat,
    ) -> Result<ExportResponse, ApiError> {
        let path = format!("{}/{}/{}", EXPORT_ENDPOINT, document_id, format.as_str());

        let response = self
            .http
            .get(self.url(&path))
            .send()
            .await
            .map_err(|e| ApiError::request_failed(EXPORT_ENDPOINT, e))?;

        let response = ensure_success(EXPORT_ENDPOINT, response).await?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(EXPORT_ENDPOINT, e))?;

        Ok(ExportResponse {
            content_disposition,
            body: body.to_vec(),
        })
    }

    async fn get_summary(&self, document_id: &str) -> Result<Value, ApiError> {
        let path = format!("{}/{}", GET_SUMMARY_ENDPOINT, document_id);
        let mut value = self.get_json(GET_SUMMARY_ENDPOINT, &path).await?;

        match value.get_mut("summary") {
            Some(summary) => Ok(summary.take()),
            None => Err(ApiError::missing_field(GET_SUMMARY_ENDPOINT, "summary")),
        }
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.get_json(HEALTH_ENDPOINT, HEALTH_ENDPOINT).await
    }
}

/// 非 2xx 状态转换为 [`ApiError::BadStatus`]
async fn ensure_success(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(
        "接口 {} 返回 {}: {}",
        endpoint,
        status,
        truncate_text(&body, 200)
    );

    Err(ApiError::BadStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

async fn read_json(endpoint: &str, response: Response) -> Result<Value, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::request_failed(endpoint, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}
