// Lyrics → SFT pair pipeline.
// Reader → Summarizer → Prompt Builder → Completion Builder → batched Writer.
// All model calls go through llm_client via the Summarizer seam.

pub mod completion;
pub mod orchestrator;
pub mod prompt;
pub mod summarizer;
pub mod throttle;
