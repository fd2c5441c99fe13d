pub mod context_file;
pub mod jira;
pub mod openai;
