pub mod summary_api;
pub mod summary_client;

pub use summary_api::{SaveSummaryRequest, SummaryApi};
pub use summary_client::SummaryClient;
