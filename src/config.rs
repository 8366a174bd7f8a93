use crate::models::ExportFormat;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 处理服务地址（`/process`、`/save_summary`、`/export` 的前缀）
    pub api_base_url: String,
    /// 待上传 PDF 所在目录
    pub input_folder: String,
    /// 公司信息 TOML 文件
    pub company_file: String,
    /// 导出文件保存目录
    pub output_folder: String,
    /// 需要下载的导出格式
    pub export_formats: Vec<ExportFormat>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            input_folder: "input_pdfs".to_string(),
            company_file: "company.toml".to_string(),
            output_folder: "exports".to_string(),
            export_formats: ExportFormat::ALL.to_vec(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(default.input_folder),
            company_file: std::env::var("COMPANY_FILE").unwrap_or(default.company_file),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            export_formats: std::env::var("EXPORT_FORMATS")
                .ok()
                .map(|v| ExportFormat::parse_list(&v))
                .filter(|formats| !formats.is_empty())
                .unwrap_or(default.export_formats),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
