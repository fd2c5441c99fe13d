use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::services::ContextSource;

/// Reads the guidance document from disk on every call.
pub struct ContextFile {
    path: PathBuf,
}

impl ContextFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContextSource for ContextFile {
    async fn load(&self) -> AppResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            AppError::Configuration(format!(
                "failed to read context file {}: {err}",
                self.path.display()
            ))
        })
    }
}
