//! The fixed course catalogue. The recommender may only ever suggest these.

pub const CATALOGUE: [&str; 15] = [
    "Medicine and Surgery",
    "Law",
    "Civil Engineering",
    "Mechanical Engineering",
    "Electrical Engineering",
    "Computer Science",
    "Information Technology",
    "Business Administration",
    "Accounting",
    "Nursing and Nursing Science",
    "Agriculture",
    "Mass Communication",
    "Environmental Science",
    "Education",
    "Pharmacy",
];

/// Renders the catalogue as a 1-based numbered list, one course per line.
pub fn render_numbered() -> String {
    CATALOGUE
        .iter()
        .enumerate()
        .map(|(i, course)| format!("{}. {course}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
