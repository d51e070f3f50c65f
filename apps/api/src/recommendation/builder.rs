//! Prompt Builder: turns a user profile or a (course, topic) pair into a `PromptSpec`.
//!
//! Pure and synchronous: no clock, no randomness, no LLM call. Identical inputs always
//! produce byte-identical prompts.

use crate::llm_client::PromptSpec;
use crate::models::profile::UserProfile;
use crate::recommendation::catalogue::render_numbered;
use crate::recommendation::prompts::{
    DESCRIPTION_TEMPLATE, RECOMMENDATION_DIRECTIVE, RECOMMENDATION_OUTPUT_DIRECTIVE,
    SALARY_TEMPLATE, SCOPE_TEMPLATE, STEPS_TEMPLATE, TOP_SKILLS_TEMPLATE,
    TOP_UNIVERSITIES_TEMPLATE, WORD_LIMIT_CLAUSE, WORK_LIFE_TEMPLATE,
};

/// One of the fixed follow-up questions a client may ask about a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentTopic {
    Description,
    Scope,
    Steps,
    TopUniversities,
    Salary,
    TopSkills,
    WorkLife,
}

impl EnrichmentTopic {
    pub const ALL: [EnrichmentTopic; 7] = [
        EnrichmentTopic::Description,
        EnrichmentTopic::Scope,
        EnrichmentTopic::Steps,
        EnrichmentTopic::TopUniversities,
        EnrichmentTopic::Salary,
        EnrichmentTopic::TopSkills,
        EnrichmentTopic::WorkLife,
    ];

    pub fn template(self) -> &'static str {
        match self {
            EnrichmentTopic::Description => DESCRIPTION_TEMPLATE,
            EnrichmentTopic::Scope => SCOPE_TEMPLATE,
            EnrichmentTopic::Steps => STEPS_TEMPLATE,
            EnrichmentTopic::TopUniversities => TOP_UNIVERSITIES_TEMPLATE,
            EnrichmentTopic::Salary => SALARY_TEMPLATE,
            EnrichmentTopic::TopSkills => TOP_SKILLS_TEMPLATE,
            EnrichmentTopic::WorkLife => WORK_LIFE_TEMPLATE,
        }
    }

    /// Route the topic is served on.
    pub fn path(self) -> &'static str {
        match self {
            EnrichmentTopic::Description => "/get_descrip",
            EnrichmentTopic::Scope => "/get_scope",
            EnrichmentTopic::Steps => "/get_steps",
            EnrichmentTopic::TopUniversities => "/get_top_uni",
            EnrichmentTopic::Salary => "/get_salary",
            EnrichmentTopic::TopSkills => "/get_top_skills",
            EnrichmentTopic::WorkLife => "/get_work_life",
        }
    }
}

/// Builds the course recommendation prompt: directive, numbered catalogue,
/// labelled profile, output directive.
pub fn build_recommendation(profile: &UserProfile) -> PromptSpec {
    let profile_block = format!(
        "Username: {}\n\
         Favorite Tasks/Activities: {}\n\
         Soft Skills: {}, {}, {}\n\
         Technical Skills: {}, {}, {}\n\
         Career Choices: {}, {}, {}",
        profile.username,
        profile.task_activities,
        profile.softskill1,
        profile.softskill2,
        profile.softskill3,
        profile.technical1,
        profile.technical2,
        profile.technical3,
        profile.career1,
        profile.career2,
        profile.career3,
    );

    let content = [
        RECOMMENDATION_DIRECTIVE.to_string(),
        render_numbered(),
        profile_block,
        RECOMMENDATION_OUTPUT_DIRECTIVE.to_string(),
    ]
    .join("\n\n");

    PromptSpec::user(content)
}

/// Builds a follow-up question about `course_name`. The name is opaque: it is not
/// checked against the catalogue.
pub fn build_enrichment(course_name: &str, topic: EnrichmentTopic) -> PromptSpec {
    let question = topic.template().replace("{course}", course_name);
    PromptSpec::user(format!("{question} {WORD_LIMIT_CLAUSE}"))
}
