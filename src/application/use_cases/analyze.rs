// ============================================================
// ANALYSIS PIPELINE
// ============================================================
// Ordered steps: summarize -> narrate -> visualize

use crate::application::use_cases::narrate::NarrateUseCase;
use crate::application::use_cases::summarize::SummarizeUseCase;
use crate::application::use_cases::visualize::VisualizeUseCase;
use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use crate::domain::report::{AnalysisReport, PlotOutcome};
use crate::infrastructure::llm_clients::LLMClient;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the full analysis over one uploaded CSV.
///
/// Steps run strictly in order and block within the request task. A failure
/// in summarize or narrate aborts the invocation; the visualizer folds its
/// own failures into the report instead.
pub struct AnalyzeCsvUseCase {
    summarize: SummarizeUseCase,
    narrate: NarrateUseCase,
    visualize: VisualizeUseCase,
}

impl AnalyzeCsvUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self {
            summarize: SummarizeUseCase::new(),
            narrate: NarrateUseCase::new(llm_client),
            visualize: VisualizeUseCase::new(),
        }
    }

    pub async fn execute(
        &self,
        llm_config: &LLMConfig,
        upload_id: &str,
        csv_path: &Path,
        plot_path: &Path,
    ) -> Result<AnalysisReport> {
        let statistics = self.summarize.execute(csv_path)?;
        info!(upload_id, "Statistics table generated");

        // Narration always describes the table computed just above
        let narration = self.narrate.execute(llm_config, &statistics).await?;
        info!(upload_id, "Narration received from LLM");

        let plot = self.visualize.execute(csv_path, plot_path)?;
        match &plot {
            PlotOutcome::Rendered { path } => {
                info!(upload_id, path = %path.display(), "Plot rendered");
            }
            PlotOutcome::Skipped { reason } => {
                // Surfaced to operators here; the HTTP response only
                // reflects it as an empty image field
                warn!(upload_id, reason = %reason, "Plot skipped");
            }
        }

        Ok(AnalysisReport {
            upload_id: upload_id.to_string(),
            statistics,
            narration,
            plot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubClient;

    #[async_trait]
    impl LLMClient for StubClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            _system: &str,
            _user: &str,
        ) -> Result<String> {
            Ok("The data shows a narrow age distribution.".to_string())
        }
    }

    #[tokio::test]
    async fn test_pipeline_produces_full_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = dir.path().join("data.csv");
        std::fs::write(&csv, "age,name\n25,alice\n30,bob\n").expect("write");
        let plot = dir.path().join("plot.png");

        let use_case = AnalyzeCsvUseCase::new(Arc::new(StubClient));
        let report = use_case
            .execute(&LLMConfig::default(), "test-upload", &csv, &plot)
            .await
            .expect("pipeline");

        assert_eq!(report.upload_id, "test-upload");
        assert!(report.statistics.contains("mean"));
        assert!(report.narration.contains("distribution"));
        assert!(report.plot.is_rendered());
    }

    #[tokio::test]
    async fn test_pipeline_reports_skipped_plot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = dir.path().join("data.csv");
        std::fs::write(&csv, "name\nalice\nbob\n").expect("write");
        let plot = dir.path().join("plot.png");

        let use_case = AnalyzeCsvUseCase::new(Arc::new(StubClient));
        let report = use_case
            .execute(&LLMConfig::default(), "test-upload", &csv, &plot)
            .await
            .expect("pipeline");

        assert!(!report.plot.is_rendered());
        assert!(!report.narration.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_aborts_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let plot = dir.path().join("plot.png");

        let use_case = AnalyzeCsvUseCase::new(Arc::new(StubClient));
        let result = use_case
            .execute(
                &LLMConfig::default(),
                "test-upload",
                Path::new("/nonexistent.csv"),
                &plot,
            )
            .await;
        assert!(result.is_err());
    }
}
