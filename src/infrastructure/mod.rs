pub mod config;
pub mod csv;
pub mod llm_clients;
pub mod plot;
pub mod response;
pub mod storage;
