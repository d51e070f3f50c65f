// All LLM prompt wording for recommendation and enrichment lives here.
// The templates are the contract the model is tuned against; change them deliberately.

/// Opening directive of the recommendation prompt. Followed by the numbered catalogue.
/// Must not mention any course name itself.
pub const RECOMMENDATION_DIRECTIVE: &str = "You are a careers adviser helping a student pick a \
    university course. Give a personalised course recommendation for the student described \
    below. Choose strictly from the following list of courses and never suggest a course \
    that is not on it:";

/// Closing directive of the recommendation prompt.
pub const RECOMMENDATION_OUTPUT_DIRECTIVE: &str = "Return the top three courses from the list \
    that best fit this student, ranked from most to least suitable, with a brief \
    justification for each. Keep the whole answer under 150 words.";

/// Appended to every enrichment question.
pub const WORD_LIMIT_CLAUSE: &str = "In not more than 100 words";

// Enrichment templates. Replace `{course}` before sending.

pub const DESCRIPTION_TEMPLATE: &str =
    "write a brief description of the {course} course, highlighting its main focus and career paths.";

pub const SCOPE_TEMPLATE: &str = "What are the job prospects and scope of the {course} field in \
    Nigeria, and what industries can graduates work in?";

pub const STEPS_TEMPLATE: &str = "Outline the step-by-step process of pursuing a career in \
    {course}, from education to professional certification.";

pub const TOP_UNIVERSITIES_TEMPLATE: &str = "List the top universities in Nigeria that offer \
    {course} courses, including their location and program duration.";

pub const SALARY_TEMPLATE: &str = "What is the average salary range per annum for {course} \
    professionals in Nigeria, and how does experience affect salary?";

pub const TOP_SKILLS_TEMPLATE: &str = "What are the essential skills required to succeed in the \
    {course} field, and how can they be developed?";

pub const WORK_LIFE_TEMPLATE: &str = "What is the typical work-life balance like for {course} \
    professionals, and how can they maintain a healthy balance between work and personal life?";
