//! 上传编排器 - 流程层
//!
//! ## 职责
//!
//! 持有待上传的文件批次和可选的公司信息，驱动两阶段提交：
//!
//! 1. **process**：以 multipart 上传全部文件和公司信息
//! 2. **persist**：把文件名、处理结果和公司信息保存到 `/save_summary`
//!
//! 状态只有一个值 [`UploadState`]，进度由状态推导，不会出现
//! "Idle 但进度为 100" 这样的组合。
//!
//! 任一阶段失败都会进入 `Failed` 并把进度清零，文件和公司信息保留，
//! 调用方可以直接再次 `submit()`。第二阶段失败时不会回滚第一阶段。

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::clients::summary_api::SAVE_SUMMARY_ENDPOINT;
use crate::clients::{SaveSummaryRequest, SummaryApi};
use crate::error::{ApiError, AppResult, BusinessError, SubmissionError, SubmissionStage};
use crate::models::{CompanyMetadata, SubmissionResult, UploadBatch, UploadFile};

/// 第一阶段完成后的进度
pub const PROCESS_DONE_PROGRESS: u8 = 50;
/// 第二阶段完成后的进度
pub const PERSIST_DONE_PROGRESS: u8 = 100;

/// 编排器状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// 尚未提交
    Idle,
    /// 提交进行中
    Submitting { progress: u8 },
    /// 两个阶段都已成功
    Done { document_id: String },
    /// 最近一次提交失败
    Failed { reason: String },
}

impl UploadState {
    /// 当前进度百分比
    pub fn progress(&self) -> u8 {
        match self {
            UploadState::Idle | UploadState::Failed { .. } => 0,
            UploadState::Submitting { progress } => *progress,
            UploadState::Done { .. } => PERSIST_DONE_PROGRESS,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, UploadState::Submitting { .. })
    }
}

/// 上传编排器
pub struct UploadOrchestrator<A> {
    api: A,
    files: UploadBatch,
    metadata: Option<CompanyMetadata>,
    state: watch::Sender<UploadState>,
}

impl<A: SummaryApi> UploadOrchestrator<A> {
    /// 创建新的编排器
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            api,
            files: UploadBatch::new(),
            metadata: None,
            state,
        }
    }

    /// 绑定公司信息
    pub fn with_metadata(mut self, metadata: CompanyMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn set_metadata(&mut self, metadata: Option<CompanyMetadata>) -> AppResult<()> {
        self.ensure_not_submitting()?;
        self.metadata = metadata;
        Ok(())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn files(&self) -> &UploadBatch {
        &self.files
    }

    pub fn metadata(&self) -> Option<&CompanyMetadata> {
        self.metadata.as_ref()
    }

    /// 当前状态的快照
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    pub fn progress(&self) -> u8 {
        self.state.borrow().progress()
    }

    /// 订阅状态变化，用于在提交挂起期间展示进度
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// 追加文件，非 PDF 文件会被跳过
    ///
    /// # 返回
    /// 实际加入批次的文件数
    pub fn add_files(&mut self, new_files: impl IntoIterator<Item = UploadFile>) -> AppResult<usize> {
        self.ensure_not_submitting()?;

        let mut accepted = 0;
        for file in new_files {
            if !file.is_pdf() {
                warn!("⚠️ 跳过非PDF文件: {}", file.name());
                continue;
            }
            debug!("加入文件: {} ({})", file.truncated_name(40), file.size_label());
            self.files.push(file);
            accepted += 1;
        }
        Ok(accepted)
    }

    /// 按位置移除文件，越界时不做任何修改
    pub fn remove_file(&mut self, index: usize) -> AppResult<Option<UploadFile>> {
        self.ensure_not_submitting()?;

        let removed = self.files.remove(index);
        if removed.is_none() {
            debug!("移除索引 {} 超出范围 (共 {} 个文件)", index, self.files.len());
        }
        Ok(removed)
    }

    /// 清空批次并回到 Idle
    pub fn reset(&mut self) -> AppResult<()> {
        self.ensure_not_submitting()?;
        self.files.clear();
        self.transition(UploadState::Idle);
        Ok(())
    }

    /// 执行两阶段提交
    ///
    /// 批次为空或已在提交中时直接返回 `Ok(None)`。
    pub async fn submit(&mut self) -> AppResult<Option<SubmissionResult>> {
        if self.files.is_empty() {
            debug!("批次为空，忽略提交");
            return Ok(None);
        }
        if self.state.borrow().is_submitting() {
            debug!("已有提交进行中，忽略本次提交");
            return Ok(None);
        }

        self.transition(UploadState::Submitting { progress: 0 });
        info!("📤 开始提交 {} 个文件...", self.files.len());

        // future 被中途丢弃时不能停留在 Submitting
        let _guard = SubmittingGuard { state: &self.state };

        match self.run_phases().await {
            Ok(result) => {
                self.transition(UploadState::Done {
                    document_id: result.document_id.clone(),
                });
                info!("✓ 提交完成，文档ID: {}", result.document_id);
                Ok(Some(result))
            }
            Err(err) => {
                error!("❌ 提交失败: {}", err);
                self.transition(UploadState::Failed {
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    async fn run_phases(&self) -> Result<SubmissionResult, SubmissionError> {
        let summary = self.process_phase().await?;
        self.transition(UploadState::Submitting {
            progress: PROCESS_DONE_PROGRESS,
        });

        let document_id = self.persist_phase(&summary).await?;
        self.transition(UploadState::Submitting {
            progress: PERSIST_DONE_PROGRESS,
        });

        Ok(SubmissionResult { document_id })
    }

    async fn process_phase(&self) -> Result<Value, SubmissionError> {
        debug!("阶段 1: 上传并处理");
        self.api
            .process(self.files.files(), self.metadata.as_ref())
            .await
            .map_err(|e| SubmissionError::at_stage(SubmissionStage::Process, e))
    }

    async fn persist_phase(&self, summary: &Value) -> Result<String, SubmissionError> {
        debug!("阶段 2: 保存摘要");
        let request = SaveSummaryRequest {
            filename: self.files.joined_names(),
            summary,
            company_details: self.metadata.as_ref(),
        };

        let response = self
            .api
            .save_summary(&request)
            .await
            .map_err(|e| SubmissionError::at_stage(SubmissionStage::Persist, e))?;

        if let Some(summary_id) = &response.summary_id {
            debug!("摘要已保存，summary_id: {}", summary_id);
        }

        response.pdf_id.ok_or_else(|| {
            SubmissionError::at_stage(
                SubmissionStage::Persist,
                ApiError::missing_field(SAVE_SUMMARY_ENDPOINT, "pdf_id"),
            )
        })
    }

    fn transition(&self, next: UploadState) {
        debug!("状态变化: {:?}", next);
        self.state.send_replace(next);
    }

    fn ensure_not_submitting(&self) -> AppResult<()> {
        if self.state.borrow().is_submitting() {
            return Err(BusinessError::SubmissionInProgress.into());
        }
        Ok(())
    }
}

/// 提交 future 被丢弃时把状态置为 Failed
struct SubmittingGuard<'a> {
    state: &'a watch::Sender<UploadState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if !state.is_submitting() {
                return false;
            }
            warn!("⚠️ 提交在完成前被中断");
            *state = UploadState::Failed {
                reason: "submission interrupted".to_string(),
            };
            true
        });
    }
}
