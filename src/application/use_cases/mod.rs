pub mod numeric_analysis;
pub mod upload_summary;
