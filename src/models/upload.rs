//! 上传文件与批次

use std::path::Path;

/// 待上传的单个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    name: String,
    content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 文件字节数
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// 只接受 `.pdf` 扩展名（不区分大小写）
    pub fn is_pdf(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }

    /// 以 MB 显示大小，保留两位小数
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }

    /// 截断过长的文件名，保留扩展名
    pub fn truncated_name(&self, max_len: usize) -> String {
        if self.name.chars().count() <= max_len {
            return self.name.clone();
        }

        let (stem, ext) = match self.name.rfind('.') {
            Some(pos) => (&self.name[..pos], &self.name[pos + 1..]),
            None => (self.name.as_str(), ""),
        };
        let keep = max_len.saturating_sub(10);
        let head: String = stem.chars().take(keep).collect();
        format!("{}....{}", head, ext)
    }
}

/// 有序的上传批次
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<UploadFile>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: UploadFile) {
        self.files.push(file);
    }

    /// 按位置移除，越界时返回 None 且批次不变
    pub fn remove(&mut self, index: usize) -> Option<UploadFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    /// 所有文件大小之和
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(UploadFile::size).sum()
    }

    /// 用于 `/save_summary` 的 filename 字段
    pub fn joined_names(&self) -> String {
        self.files
            .iter()
            .map(UploadFile::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
