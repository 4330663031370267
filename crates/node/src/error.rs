use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
