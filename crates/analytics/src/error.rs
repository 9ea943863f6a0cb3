use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),
}
