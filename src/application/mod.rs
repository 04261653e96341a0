pub mod use_cases;

pub use use_cases::numeric_analysis::NumericAnalyzer;
pub use use_cases::upload_summary::{UploadSummary, UploadSummaryUseCase};
