use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid fixture definition: {0}")]
    Parse(#[from] serde_json::Error),
}
