pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use crate::application::AnalyzeCsvUseCase;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::OpenAIClient;
use crate::infrastructure::storage;
use crate::interfaces::http::{build_server, HttpState};
use std::sync::Arc;
use tracing::info;

/// Wire up dependencies and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    storage::ensure_upload_root(&config.upload_dir)?;

    let llm_client = Arc::new(OpenAIClient::new());
    let state = Arc::new(HttpState {
        analyze_use_case: AnalyzeCsvUseCase::new(llm_client),
        llm_config: config.llm.clone(),
        upload_root: config.upload_dir.clone(),
    });

    info!(
        host = %config.server.host,
        port = config.server.port,
        upload_dir = %config.upload_dir.display(),
        model = %config.llm.model,
        "Starting csv-insight"
    );

    build_server(state, &config.server.host, config.server.port)?.await
}
