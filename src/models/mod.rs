pub mod application;
pub mod resume;
pub mod role;
pub mod user;
pub mod vacancy;

pub use application::{ApplicationStatus, Candidate, UserApplication};
pub use resume::{ProcessedResume, Resume, ResumeUpload};
pub use role::{Principal, Role};
pub use user::{HrAccount, HrProfile, UserAccount, UserProfile};
pub use vacancy::{
    EmploymentType, ExperienceTime, JobFormat, ProfessionSuggestion, PublicVacancy,
    ReviewDecision, Vacancy, VacancyStatus,
};

use crate::error::{Error, Result};

fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Matches `raw` against the labels of `options`, ignoring case, spaces,
/// hyphens and underscores.
pub(crate) fn parse_label<T: Copy>(
    field: &'static str,
    raw: &str,
    options: &[T],
    label: impl Fn(&T) -> &'static str,
) -> Result<T> {
    let wanted = normalize_label(raw);
    options
        .iter()
        .find(|option| normalize_label(label(*option)) == wanted)
        .copied()
        .ok_or_else(|| Error::invalid(field, format!("Unknown value: {}", raw.trim())))
}
