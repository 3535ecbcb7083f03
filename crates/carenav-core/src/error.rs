use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid checklist id: {0}")]
    InvalidChecklistId(String),
}
