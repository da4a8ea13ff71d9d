use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Error in calculation: {0}")]
    Calculation(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
