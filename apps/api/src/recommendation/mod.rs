// Recommendation & enrichment: catalogue, prompt building, and the LLM-backed endpoints.
// All provider calls go through llm_client; no direct HTTP calls here.

pub mod builder;
pub mod catalogue;
pub mod handlers;
pub mod prompts;
