//! 导出下载器 - 流程层
//!
//! 按文档ID下载 PDF / Excel 导出文件。每种格式单独请求、单独报错，
//! 一种格式失败不影响另一种。

use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{error, info};

use crate::clients::SummaryApi;
use crate::error::DownloadError;
use crate::models::ExportFormat;

/// 单个格式的下载结果
#[derive(Debug)]
pub struct DownloadOutcome {
    pub format: ExportFormat,
    pub result: Result<PathBuf, DownloadError>,
}

/// 导出下载器
pub struct ExportDownloader<'a, A> {
    api: &'a A,
    output_dir: PathBuf,
}

impl<'a, A: SummaryApi> ExportDownloader<'a, A> {
    pub fn new(api: &'a A, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            output_dir: output_dir.into(),
        }
    }

    /// 下载一种格式并写入输出目录，返回保存路径
    pub async fn download(
        &self,
        document_id: &str,
        format: ExportFormat,
    ) -> Result<PathBuf, DownloadError> {
        let response = self
            .api
            .export(document_id, format)
            .await
            .map_err(|source| DownloadError::Request { format, source })?;

        let filename = safe_filename(&response.filename(document_id, format), document_id, format);
        let path = self.output_dir.join(filename);

        let write = async {
            tokio::fs::create_dir_all(&self.output_dir).await?;
            tokio::fs::write(&path, &response.body).await
        };
        write.await.map_err(|source| DownloadError::WriteFailed {
            format,
            path: path.display().to_string(),
            source,
        })?;

        info!(
            "✓ 已下载 {} ({} 字节): {}",
            format.as_str().to_uppercase(),
            response.body.len(),
            path.display()
        );
        Ok(path)
    }

    /// 并发下载多种格式，结果顺序与 `formats` 一致
    pub async fn download_all(
        &self,
        document_id: &str,
        formats: &[ExportFormat],
    ) -> Vec<DownloadOutcome> {
        let tasks = formats.iter().map(|&format| async move {
            let result = self.download(document_id, format).await;
            if let Err(e) = &result {
                error!("❌ {} ({})", e.user_message(), e);
            }
            DownloadOutcome { format, result }
        });

        join_all(tasks).await
    }
}

/// 只保留文件名部分，防止响应头中的路径写出输出目录
fn safe_filename(candidate: &str, document_id: &str, format: ExportFormat) -> String {
    Path::new(candidate)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format.default_filename(document_id))
}
