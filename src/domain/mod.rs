pub mod csv;
pub mod error;
pub mod llm_config;
pub mod report;
