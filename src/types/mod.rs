pub mod config;
pub mod jira;
pub mod metrics;
pub mod report;
