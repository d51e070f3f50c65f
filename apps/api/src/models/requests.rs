use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{require_non_empty, Validate};
use crate::profile::store::{NewProfile, ProfileUpdate, TripleRow};

// ────────────────────────────────────────────────────────────────────────────
// LLM endpoints
// ────────────────────────────────────────────────────────────────────────────

/// Body of every enrichment endpoint.
#[derive(Debug, Deserialize)]
pub struct CareerQuery {
    pub career_name: String,
}

impl Validate for CareerQuery {
    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("career_name", &self.career_name)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Profile endpoints
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddProfileRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub photo_url: String,
}

impl Validate for AddProfileRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("user_id", &self.user_id)
    }
}

impl From<AddProfileRequest> for NewProfile {
    fn from(req: AddProfileRequest) -> Self {
        NewProfile {
            id: req.user_id,
            display_name: req.name,
            email: req.email,
            photo_url: req.photo_url,
        }
    }
}

/// Clients also send a `refresh_token`; it is accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl Validate for TokenRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("accessToken", &self.access_token)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSkillsRequest {
    pub user_id: String,
    pub technical1: String,
    pub technical2: String,
    pub technical3: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftSkillRequest {
    pub user_id: String,
    pub softskill1: String,
    pub softskill2: String,
    pub softskill3: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRequest {
    pub user_id: String,
    pub career1: String,
    pub career2: String,
    pub career3: String,
}

macro_rules! triple_request {
    ($ty:ty, $a:ident, $b:ident, $c:ident) => {
        impl Validate for $ty {
            fn validate(&self) -> Result<(), AppError> {
                require_non_empty("userId", &self.user_id)?;
                require_non_empty(stringify!($a), &self.$a)?;
                require_non_empty(stringify!($b), &self.$b)?;
                require_non_empty(stringify!($c), &self.$c)
            }
        }

        impl From<$ty> for TripleRow {
            fn from(req: $ty) -> Self {
                TripleRow {
                    user_id: req.user_id,
                    values: [req.$a, req.$b, req.$c],
                }
            }
        }
    };
}

triple_request!(TechnicalSkillsRequest, technical1, technical2, technical3);
triple_request!(SoftSkillRequest, softskill1, softskill2, softskill3);
triple_request!(CareerRequest, career1, career2, career3);

#[derive(Debug, Deserialize)]
pub struct EducationLevelRequest {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
    #[serde(rename = "highestEducationLevel")]
    pub highest_education_level: String,
    pub who_are_you: String,
}

impl Validate for EducationLevelRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("userId", &self.user_id)?;
        require_non_empty("highestEducationLevel", &self.highest_education_level)?;
        require_non_empty("who_are_you", &self.who_are_you)
    }
}

impl EducationLevelRequest {
    pub fn into_parts(self) -> (String, ProfileUpdate) {
        (
            self.user_id,
            ProfileUpdate::EducationLevel {
                highest_education_level: self.highest_education_level,
                who_are_you: self.who_are_you,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub activities: String,
}

impl Validate for ActivitiesRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_non_empty("userId", &self.user_id)?;
        require_non_empty("activities", &self.activities)
    }
}

impl ActivitiesRequest {
    pub fn into_parts(self) -> (String, ProfileUpdate) {
        (
            self.user_id,
            ProfileUpdate::Activities {
                activities: self.activities,
            },
        )
    }
}
