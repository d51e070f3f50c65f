use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{require_non_empty, Validate};

/// Self-described user attributes sent to `/prompt` and `/api`.
/// Built per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub task_activities: String,
    pub softskill1: String,
    pub softskill2: String,
    pub softskill3: String,
    pub technical1: String,
    pub technical2: String,
    pub technical3: String,
    pub career1: String,
    pub career2: String,
    pub career3: String,
}

impl Validate for UserProfile {
    fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("username", &self.username),
            ("task_activities", &self.task_activities),
            ("softskill1", &self.softskill1),
            ("softskill2", &self.softskill2),
            ("softskill3", &self.softskill3),
            ("technical1", &self.technical1),
            ("technical2", &self.technical2),
            ("technical3", &self.technical3),
            ("career1", &self.career1),
            ("career2", &self.career2),
            ("career3", &self.career3),
        ];
        fields
            .into_iter()
            .try_for_each(|(name, value)| require_non_empty(name, value))
    }
}
