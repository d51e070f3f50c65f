//! Persistence seam: the operations the handlers need from the hosted store.
//!
//! `AppState` carries an `Arc<dyn ProfileStore>`. Production uses `SupabaseStore`;
//! tests use an in-memory double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected store response: {0}")]
    Decode(String),
}

/// Per-user tables holding exactly three ranked values each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillTable {
    SoftSkills,
    TechnicalSkills,
    Careers,
}

impl SkillTable {
    pub fn name(self) -> &'static str {
        match self {
            SkillTable::SoftSkills => "softskills",
            SkillTable::TechnicalSkills => "technicalSkills",
            SkillTable::Careers => "careers",
        }
    }

    pub fn columns(self) -> [&'static str; 3] {
        match self {
            SkillTable::SoftSkills => ["softskill1", "softskill2", "softskill3"],
            SkillTable::TechnicalSkills => ["technical1", "technical2", "technical3"],
            SkillTable::Careers => ["career1", "career2", "career3"],
        }
    }

    pub fn added_message(self) -> &'static str {
        match self {
            SkillTable::SoftSkills => "Added softskill successfully",
            SkillTable::TechnicalSkills => "Technical skills added successfully",
            SkillTable::Careers => "Career added successfully",
        }
    }

    pub fn updated_message(self) -> &'static str {
        match self {
            SkillTable::SoftSkills => "Updated softskill successfully",
            SkillTable::TechnicalSkills => "Technical skills updated successfully",
            SkillTable::Careers => "Career updated successfully",
        }
    }

    pub fn failure_detail(self) -> &'static str {
        match self {
            SkillTable::SoftSkills => "Error in Adding Soft Skill",
            SkillTable::TechnicalSkills => "Error adding Technical Skill",
            SkillTable::Careers => "Error adding career",
        }
    }
}

/// A user's row in one of the `SkillTable`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleRow {
    pub user_id: String,
    pub values: [String; 3],
}

impl TripleRow {
    /// Column-keyed JSON for `table`, including the `userId` foreign key.
    pub fn to_json(&self, table: SkillTable) -> Value {
        let mut row = Map::new();
        for (column, value) in table.columns().iter().zip(&self.values) {
            row.insert((*column).to_string(), Value::String(value.clone()));
        }
        row.insert("userId".to_string(), Value::String(self.user_id.clone()));
        Value::Object(row)
    }
}

/// First-login profile row, keyed by the auth user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: String,
}

impl NewProfile {
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "displayName": self.display_name,
            "email": self.email,
            "photoURL": self.photo_url,
        })
    }
}

/// Partial updates applied to a `profiles` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdate {
    EducationLevel {
        highest_education_level: String,
        who_are_you: String,
    },
    Activities {
        activities: String,
    },
}

impl ProfileUpdate {
    pub fn to_json(&self) -> Value {
        match self {
            ProfileUpdate::EducationLevel {
                highest_education_level,
                who_are_you,
            } => json!({
                "highestEducationLevel": highest_education_level,
                "who_are_you": who_are_you,
            }),
            ProfileUpdate::Activities { activities } => json!({ "activities": activities }),
        }
    }
}

/// Result of inserting a profile: the returned rows and, when reported, how many.
#[derive(Debug, Clone, PartialEq)]
pub struct Inserted {
    pub data: Value,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// The subset of the auth user object the service reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: &NewProfile) -> Result<Inserted, StoreError>;

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Value, StoreError>;

    /// Number of rows in `table` owned by `user_id`.
    async fn count_rows(&self, table: SkillTable, user_id: &str) -> Result<u64, StoreError>;

    async fn insert_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError>;

    async fn update_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError>;

    /// The profile joined with its careers, softskills and technicalSkills rows.
    async fn fetch_user_info(&self, user_id: &str) -> Result<Value, StoreError>;

    /// Resolves an access token to its auth user.
    async fn get_auth_user(&self, access_token: &str) -> Result<AuthUser, StoreError>;
}
