pub mod company;
pub mod export;
pub mod loaders;
pub mod upload;

pub use company::{CompanyDetailsInput, CompanyMetadata, FieldId};
pub use export::{ExportFormat, ExportResponse, SaveSummaryResponse, SubmissionResult};
pub use loaders::{load_company_details, load_pdf_files};
pub use upload::{UploadBatch, UploadFile};
