// Resume & cover-letter generation.
// Implements: prompt building, tone calibration, generation calls with per-call fallbacks.
// All service calls go through the llm_client::TextGenerator seam.

pub mod generator;
pub mod handlers;
pub mod outcome;
pub mod prompt_builder;
pub mod prompts;
pub mod tone;
