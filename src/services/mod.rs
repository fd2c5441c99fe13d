pub mod context_source;
pub mod issue_tracker;
pub mod language_model;

pub use context_source::ContextSource;
pub use issue_tracker::IssueTrackerService;
pub use language_model::{FunctionCall, FunctionCallRequest, LanguageModelService};
