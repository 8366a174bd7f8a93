use cersai_intake::config::Config;
use cersai_intake::models::{load_company_details, load_pdf_files};
use cersai_intake::utils::logging;
use cersai_intake::{CompanyMetadata, ExportDownloader, SummaryApi, SummaryClient, UploadOrchestrator};
use std::path::Path;

#[tokio::test]
#[ignore] // 默认忽略，需要本地处理服务：cargo test -- --ignored
async fn test_health_check() {
    logging::init(true);

    let config = Config::from_env();
    let client = SummaryClient::new(&config).expect("创建客户端失败");

    let status = client.health().await.expect("健康检查失败");
    println!("服务状态: {}", status);
}

#[tokio::test]
#[ignore]
async fn test_submit_and_export() {
    logging::init(true);

    let config = Config::from_env();
    let client = SummaryClient::new(&config).expect("创建客户端失败");

    // 注意：输入目录和公司信息文件请根据实际情况准备
    let files = load_pdf_files(&config.input_folder)
        .await
        .expect("加载PDF文件失败");
    assert!(!files.is_empty(), "输入目录中应至少有一个PDF");

    let input = load_company_details(Path::new(&config.company_file))
        .await
        .expect("加载公司信息失败");
    let metadata = CompanyMetadata::from_input(&input).expect("公司信息校验失败");

    let mut orchestrator = UploadOrchestrator::new(client).with_metadata(metadata);
    orchestrator.add_files(files).expect("加入文件失败");

    let result = orchestrator
        .submit()
        .await
        .expect("提交失败")
        .expect("批次不应为空");
    assert_eq!(orchestrator.progress(), 100);

    let summary = orchestrator
        .api()
        .get_summary(&result.document_id)
        .await
        .expect("获取摘要失败");
    assert!(!summary.is_null(), "摘要不应为空");

    let downloader = ExportDownloader::new(orchestrator.api(), &config.output_folder);
    let outcomes = downloader
        .download_all(&result.document_id, &config.export_formats)
        .await;
    for outcome in &outcomes {
        assert!(outcome.result.is_ok(), "下载 {} 应该成功", outcome.format);
    }
}
