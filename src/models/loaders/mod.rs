pub mod pdf_loader;
pub mod toml_loader;

pub use pdf_loader::load_pdf_files;
pub use toml_loader::{load_company_details, parse_company_details};
