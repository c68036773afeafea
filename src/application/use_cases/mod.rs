pub mod analyze;
pub mod narrate;
pub mod summarize;
pub mod visualize;
