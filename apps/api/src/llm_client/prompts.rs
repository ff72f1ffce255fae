// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every prompt that requests a JSON response.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that produces resume or letter text.
pub const ATS_INSTRUCTION: &str = "Make it ATS-friendly: plain text, standard \
    terminology, no tables, no special symbols, no markdown.";

/// Instruction against inventing facts.
pub const GROUNDING_INSTRUCTION: &str = "Use ONLY facts present in the candidate \
    information provided. Do NOT invent employers, dates, degrees, metrics, or skills.";
