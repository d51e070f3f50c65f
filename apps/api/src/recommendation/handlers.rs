//! Axum route handlers for the LLM-backed endpoints.
//!
//! Flow for every handler: validated body → prompt builder → gateway → `{ "response": .. }`.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::ValidJson;
use crate::llm_client::{LlmGateway, PromptSpec};
use crate::models::profile::UserProfile;
use crate::models::requests::{CareerQuery, CompletionResponse};
use crate::recommendation::builder::{build_enrichment, build_recommendation, EnrichmentTopic};
use crate::state::AppState;

async fn complete_with(
    gateway: &dyn LlmGateway,
    prompt: PromptSpec,
) -> Result<Json<CompletionResponse>, AppError> {
    let response = gateway
        .complete(&prompt)
        .await
        .map_err(AppError::provider(gateway.provider()))?;
    Ok(Json(CompletionResponse { response }))
}

/// POST /prompt
///
/// Ranks the catalogue against the user's profile via Groq.
pub async fn handle_prompt(
    State(state): State<AppState>,
    ValidJson(profile): ValidJson<UserProfile>,
) -> Result<Json<CompletionResponse>, AppError> {
    complete_with(state.llm.as_ref(), build_recommendation(&profile)).await
}

/// POST /api
///
/// Legacy variant of `/prompt` served through the OpenAI key.
pub async fn handle_legacy_api(
    State(state): State<AppState>,
    ValidJson(profile): ValidJson<UserProfile>,
) -> Result<Json<CompletionResponse>, AppError> {
    complete_with(state.legacy_llm.as_ref(), build_recommendation(&profile)).await
}

/// POST /get_descrip, /get_scope, /get_steps, /get_top_uni, /get_salary,
/// /get_top_skills, /get_work_life
pub async fn handle_enrichment(
    topic: EnrichmentTopic,
    State(state): State<AppState>,
    ValidJson(query): ValidJson<CareerQuery>,
) -> Result<Json<CompletionResponse>, AppError> {
    complete_with(
        state.llm.as_ref(),
        build_enrichment(&query.career_name, topic),
    )
    .await
}
