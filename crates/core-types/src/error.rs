use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },
}
