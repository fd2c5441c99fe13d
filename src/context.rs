use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ContextSource, IssueTrackerService, LanguageModelService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub context_source: Arc<dyn ContextSource>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        issue_tracker: Arc<dyn IssueTrackerService>,
        language_model: Arc<dyn LanguageModelService>,
        context_source: Arc<dyn ContextSource>,
    ) -> Self {
        Self {
            config,
            issue_tracker,
            language_model,
            context_source,
        }
    }
}
