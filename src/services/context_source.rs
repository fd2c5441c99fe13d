use async_trait::async_trait;

use crate::error::AppResult;

/// Supplies the guidance document injected into the extraction prompt.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn load(&self) -> AppResult<String>;
}
