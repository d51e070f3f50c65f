//! Axum route handlers for profile persistence. None of these touch the LLM.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::extract::ValidJson;
use crate::models::requests::{
    ActivitiesRequest, AddProfileRequest, CareerRequest, EducationLevelRequest,
    SoftSkillRequest, TechnicalSkillsRequest, TokenRequest,
};
use crate::profile::store::{NewProfile, SkillTable, TripleRow};
use crate::profile::upsert::{upsert_for_user, UpsertOp};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct AddProfileResponse {
    pub message: &'static str,
    pub data: Value,
    pub count: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub id: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserDetailsResponse {
    pub message: &'static str,
    pub data: UserDetails,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub message: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /addProfile
pub async fn handle_add_profile(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<AddProfileRequest>,
) -> Result<Json<AddProfileResponse>, AppError> {
    let profile = NewProfile::from(req);
    let inserted = state
        .store
        .insert_profile(&profile)
        .await
        .map_err(AppError::persistence("Error adding profile"))?;

    Ok(Json(AddProfileResponse {
        message: "Profile added successfully",
        data: inserted.data,
        count: inserted.count,
    }))
}

/// POST /get_user_details
///
/// Resolves the access token through the store's auth API.
pub async fn handle_get_user_details(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<TokenRequest>,
) -> Result<Json<UserDetailsResponse>, AppError> {
    let user = state
        .store
        .get_auth_user(&req.access_token)
        .await
        .map_err(AppError::Auth)?;

    Ok(Json(UserDetailsResponse {
        message: "User details retrieved successfully",
        data: UserDetails {
            id: user.id,
            avatar_url: user.user_metadata.avatar_url,
            email: user.user_metadata.email,
            full_name: user.user_metadata.full_name,
        },
    }))
}

/// GET /get_user_info/:user_id
///
/// Profile joined with careers, softskills and technicalSkills, passed through as-is.
pub async fn handle_get_user_info(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserInfoResponse>, AppError> {
    let data = state
        .store
        .fetch_user_info(&user_id)
        .await
        .map_err(AppError::persistence("Error getting user info"))?;

    Ok(Json(UserInfoResponse { data }))
}

/// POST /addtechnicalSkills
pub async fn handle_add_technical_skills(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<TechnicalSkillsRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    upsert_triple(&state, SkillTable::TechnicalSkills, req.into()).await
}

/// POST /addSoftskill
pub async fn handle_add_softskill(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SoftSkillRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    upsert_triple(&state, SkillTable::SoftSkills, req.into()).await
}

/// POST /addcareer
pub async fn handle_add_career(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CareerRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    upsert_triple(&state, SkillTable::Careers, req.into()).await
}

async fn upsert_triple(
    state: &AppState,
    table: SkillTable,
    row: TripleRow,
) -> Result<Json<MessageResponse>, AppError> {
    let (op, data) = upsert_for_user(state.store.as_ref(), table, &row)
        .await
        .map_err(AppError::persistence(table.failure_detail()))?;

    let message = match op {
        UpsertOp::Inserted => table.added_message(),
        UpsertOp::Updated => table.updated_message(),
    };
    Ok(Json(MessageResponse { message, data }))
}

/// POST /update_EducationLevel
pub async fn handle_update_education_level(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<EducationLevelRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (user_id, update) = req.into_parts();
    let data = state
        .store
        .update_profile(&user_id, &update)
        .await
        .map_err(AppError::persistence(
            "Error updating user's highestEducationLevel",
        ))?;

    Ok(Json(MessageResponse {
        message: "Updated highestEducationLevel successfully",
        data,
    }))
}

/// POST /updateActivities
pub async fn handle_update_activities(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ActivitiesRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let (user_id, update) = req.into_parts();
    state
        .store
        .update_profile(&user_id, &update)
        .await
        .map_err(AppError::persistence("Error updating user's activities"))?;

    Ok(Json(AckResponse {
        message: "Updated activities successfully",
    }))
}
