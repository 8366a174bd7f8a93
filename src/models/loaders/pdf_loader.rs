use crate::models::upload::UploadFile;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::fs;

/// 读取文件夹中的所有 PDF 文件，按文件名排序
pub async fn load_pdf_files(folder_path: &str) -> Result<Vec<UploadFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = fs::read(&path)
            .await
            .with_context(|| format!("无法读取PDF文件: {}", path.display()))?;

        let file = UploadFile::new(name, content);
        tracing::info!("正在加载: {} ({})", file.name(), file.size_label());
        files.push(file);
    }

    Ok(files)
}
