pub mod use_cases;

pub use use_cases::analyze::AnalyzeCsvUseCase;
pub use use_cases::narrate::NarrateUseCase;
pub use use_cases::summarize::SummarizeUseCase;
pub use use_cases::visualize::VisualizeUseCase;
