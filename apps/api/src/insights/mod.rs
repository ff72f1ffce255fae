// Deterministic, model-free helpers: keyword extraction, ATS heuristics and
// work-history arithmetic. Nothing here calls the generation service.

pub mod ats;
pub mod experience;
pub mod keywords;
