//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的上传流程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建处理服务客户端、健康检查
//! 2. **公司信息**：从 TOML 加载并逐字段校验
//! 3. **文件加载**：扫描输入目录中的 PDF
//! 4. **两阶段提交**：委托 `UploadOrchestrator`，期间输出进度
//! 5. **导出下载**：委托 `ExportDownloader`，各格式互不影响
//! 6. **统计输出**：汇总文档ID与下载结果

use crate::clients::{SummaryApi, SummaryClient};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_company_details, load_pdf_files, CompanyMetadata, UploadFile};
use crate::orchestrator::upload_orchestrator::PERSIST_DONE_PROGRESS;
use crate::orchestrator::{ExportDownloader, UploadOrchestrator, UploadState};
use crate::utils::logging::{
    append_log_line, init_log_file, log_files_loaded, log_startup, print_final_stats,
};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: SummaryClient,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config.api_base_url);

        let client = SummaryClient::new(&config).context("无法创建处理服务客户端")?;

        // 健康检查失败只记录，不阻止后续流程
        match client.health().await {
            Ok(status) => info!("✓ 处理服务在线: {}", status),
            Err(e) => warn!("⚠️ 处理服务健康检查失败: {}", e),
        }

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let metadata = self.load_metadata().await?;

        let files = self.load_files().await?;
        if files.is_empty() {
            warn!("⚠️ 没有找到待上传的PDF文件，程序结束");
            return Ok(());
        }

        let mut orchestrator = UploadOrchestrator::new(self.client.clone()).with_metadata(metadata);
        orchestrator.add_files(files)?;
        if orchestrator.files().is_empty() {
            warn!("⚠️ 没有可提交的PDF文件，程序结束");
            return Ok(());
        }
        log_files_loaded(orchestrator.files().len(), orchestrator.files().total_size());

        // 日志任务在状态进入 Done / Failed 后自行结束
        let progress = log_progress(orchestrator.subscribe());
        let (submission, _) = tokio::join!(orchestrator.submit(), progress);

        let result = match submission {
            Ok(Some(result)) => result,
            Ok(None) => {
                warn!("⚠️ 没有可提交的文件");
                return Ok(());
            }
            Err(e) => {
                if let AppError::Submission(err) = &e {
                    error!("❌ {}", err.user_message());
                }
                append_log_line(&self.config.output_log_file, &format!("提交失败: {}", e))?;
                return Err(e.into());
            }
        };

        append_log_line(
            &self.config.output_log_file,
            &format!("提交成功: {} -> {}", orchestrator.files().joined_names(), result.document_id),
        )?;

        let downloader = ExportDownloader::new(orchestrator.api(), &self.config.output_folder);
        let outcomes = downloader
            .download_all(&result.document_id, &self.config.export_formats)
            .await;

        let mut downloaded = 0;
        let mut failed = 0;
        for outcome in &outcomes {
            let line = match &outcome.result {
                Ok(path) => {
                    downloaded += 1;
                    format!("下载 {} 成功: {}", outcome.format, path.display())
                }
                Err(e) => {
                    failed += 1;
                    format!("下载 {} 失败: {}", outcome.format, e)
                }
            };
            append_log_line(&self.config.output_log_file, &line)?;
        }

        print_final_stats(
            &result.document_id,
            downloaded,
            failed,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载并校验公司信息
    async fn load_metadata(&self) -> Result<CompanyMetadata> {
        info!("\n🏢 正在读取公司信息: {}", self.config.company_file);
        let input = load_company_details(Path::new(&self.config.company_file)).await?;

        match CompanyMetadata::from_input(&input) {
            Ok(metadata) => {
                info!(
                    "✓ 公司信息校验通过: {} ({})",
                    metadata.company_name(),
                    metadata.cin_number()
                );
                Ok(metadata)
            }
            Err(errors) => {
                for err in errors.iter() {
                    error!("  ✗ {}: {}", err.field.label(), err.message());
                }
                Err(AppError::Form(errors).into())
            }
        }
    }

    /// 加载待上传的 PDF
    async fn load_files(&self) -> Result<Vec<UploadFile>> {
        info!("\n📁 正在扫描待上传的PDF文件...");
        load_pdf_files(&self.config.input_folder).await
    }
}

/// 输出提交进度，状态进入 Done / Failed 或发送端关闭时返回已输出的进度
async fn log_progress(mut rx: watch::Receiver<UploadState>) -> Vec<u8> {
    let mut logged = Vec::new();
    loop {
        let state = rx.borrow_and_update().clone();
        match state {
            UploadState::Idle => {}
            UploadState::Submitting { progress } => report_progress(&mut logged, progress),
            UploadState::Done { .. } => {
                report_progress(&mut logged, PERSIST_DONE_PROGRESS);
                break;
            }
            UploadState::Failed { .. } => break,
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
    logged
}

fn report_progress(logged: &mut Vec<u8>, progress: u8) {
    if logged.last() != Some(&progress) {
        info!("⏳ 处理进度: {}%", progress);
        logged.push(progress);
    }
}
