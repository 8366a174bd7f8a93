//! `SummaryClient` 对接口的请求构造与响应解析（基于 wiremock 模拟服务）

use cersai_intake::clients::SaveSummaryRequest;
use cersai_intake::error::{ApiError, AppError, SubmissionError};
use cersai_intake::models::CompanyDetailsInput;
use cersai_intake::{
    CompanyMetadata, Config, ExportFormat, SummaryApi, SummaryClient, UploadFile,
    UploadOrchestrator, UploadState,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SummaryClient {
    let config = Config {
        api_base_url: server.uri(),
        ..Config::default()
    };
    SummaryClient::new(&config).expect("client build")
}

fn metadata() -> CompanyMetadata {
    let input = CompanyDetailsInput {
        company_name: "Acme Widgets Pvt Ltd".to_string(),
        cin_number: "u12345ab1234ptc567890".to_string(),
        search_reference_id: "200012345678".to_string(),
        date_of_incorporation: "15081947".to_string(),
        udin: "23123456ABCDEF7890".to_string(),
        registered_office: "Nariman Point, Mumbai".to_string(),
    };
    CompanyMetadata::from_input(&input).expect("valid metadata")
}

fn pdf(name: &str) -> UploadFile {
    UploadFile::new(name, b"%PDF-1.4 body".to_vec())
}

#[tokio::test]
async fn process_sends_multipart_files_and_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_string_contains(r#"name="files[]"; filename="a.pdf""#))
        .and(body_string_contains(r#"name="files[]"; filename="b.pdf""#))
        .and(body_string_contains(r#"name="companyDetails""#))
        .and(body_string_contains(r#""cinNumber":"U12345AB1234PTC567890""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "borrowers": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let metadata = metadata();
    let summary = client(&server)
        .process(&[pdf("a.pdf"), pdf("b.pdf")], Some(&metadata))
        .await
        .expect("process");

    assert_eq!(summary, json!({ "borrowers": [] }));
}

#[tokio::test]
async fn process_without_details_omits_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .process(&[pdf("a.pdf")], None)
        .await
        .expect("process");

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="files[]""#));
    assert!(!body.contains("companyDetails"));
}

#[tokio::test]
async fn save_summary_posts_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/save_summary"))
        .and(body_partial_json(json!({
            "filename": "a.pdf, b.pdf",
            "summary": { "borrowers": [] },
            "companyDetails": { "dateOfIncorporation": "15.08.1947" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "pdf_id": "pdf-42", "summary_id": "s-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let summary = json!({ "borrowers": [] });
    let metadata = metadata();
    let request = SaveSummaryRequest {
        filename: "a.pdf, b.pdf".to_string(),
        summary: &summary,
        company_details: Some(&metadata),
    };
    let response = client(&server).save_summary(&request).await.expect("save");

    assert_eq!(response.pdf_id.as_deref(), Some("pdf-42"));
    assert_eq!(response.summary_id.as_deref(), Some("s-1"));
}

#[tokio::test]
async fn export_reads_content_disposition() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export/pdf-42/excel"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", r#"attachment; filename="cersai_42.xlsx""#)
                .set_body_bytes(b"xlsx-bytes".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .export("pdf-42", ExportFormat::Excel)
        .await
        .expect("export");

    assert_eq!(response.body, b"xlsx-bytes");
    assert_eq!(response.filename("pdf-42", ExportFormat::Excel), "cersai_42.xlsx");
}

#[tokio::test]
async fn get_summary_returns_summary_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_summary/pdf-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": { "borrowers": ["Acme"] },
            "filename": "a.pdf"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get_summary/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "filename": "a.pdf" })))
        .mount(&server)
        .await;

    let client = client(&server);
    let summary = client.get_summary("pdf-42").await.expect("summary");
    assert_eq!(summary, json!({ "borrowers": ["Acme"] }));

    let err = client.get_summary("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField { .. }));
}

#[tokio::test]
async fn health_returns_status_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client(&server).health().await.expect("health");
    assert_eq!(status["status"], "healthy");
}

#[tokio::test]
async fn non_success_status_maps_to_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/export/pdf-42/pdf"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client(&server)
        .export("pdf-42", ExportFormat::Pdf)
        .await
        .unwrap_err();

    match err {
        ApiError::BadStatus {
            status, status_text, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn process_500_fails_without_saving() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save_summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pdf_id": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let mut orchestrator = UploadOrchestrator::new(client(&server)).with_metadata(metadata());
    orchestrator.add_files(vec![pdf("a.pdf")]).unwrap();

    let err = orchestrator.submit().await.unwrap_err();
    match err {
        AppError::Submission(e @ SubmissionError::ProcessingFailed { .. }) => {
            assert_eq!(e.to_string(), "Processing failed: Internal Server Error (500)");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(matches!(orchestrator.state(), UploadState::Failed { .. }));
    assert_eq!(orchestrator.progress(), 0);
}

#[tokio::test]
async fn save_500_reports_saving_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "borrowers": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save_summary"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut orchestrator = UploadOrchestrator::new(client(&server));
    orchestrator.add_files(vec![pdf("a.pdf")]).unwrap();

    let err = orchestrator.submit().await.unwrap_err();
    match err {
        AppError::Submission(e @ SubmissionError::SavingFailed { .. }) => {
            assert_eq!(e.to_string(), "Saving failed: Internal Server Error (500)");
            assert_eq!(e.user_message(), "Error processing files. Please try again.");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(orchestrator.progress(), 0);
    assert_eq!(orchestrator.files().len(), 1);
}

#[tokio::test]
async fn full_submission_yields_pdf_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "borrowers": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/save_summary"))
        .and(body_partial_json(json!({ "filename": "a.pdf, b.pdf" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pdf_id": "pdf-7" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut orchestrator = UploadOrchestrator::new(client(&server)).with_metadata(metadata());
    orchestrator
        .add_files(vec![pdf("a.pdf"), pdf("b.pdf")])
        .unwrap();

    let result = orchestrator.submit().await.unwrap().unwrap();
    assert_eq!(result.document_id, "pdf-7");
    assert_eq!(orchestrator.progress(), 100);
}
