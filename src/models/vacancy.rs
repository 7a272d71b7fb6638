use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::parse_label;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VacancyStatus {
    #[default]
    #[serde(rename = "Under review", alias = "under_review", alias = "UNDER_REVIEW")]
    UnderReview,
    #[serde(alias = "accepted", alias = "ACCEPTED")]
    Accepted,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
}

impl VacancyStatus {
    pub const ALL: [VacancyStatus; 3] = [
        VacancyStatus::UnderReview,
        VacancyStatus::Accepted,
        VacancyStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VacancyStatus::UnderReview => "Under review",
            VacancyStatus::Accepted => "Accepted",
            VacancyStatus::Rejected => "Rejected",
        }
    }

    /// Status an HR edit submits: a rejected posting goes back into review.
    pub fn after_hr_edit(self) -> Self {
        match self {
            VacancyStatus::Rejected => VacancyStatus::UnderReview,
            other => other,
        }
    }
}

/// The only status changes an administrator can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewDecision {
    Accepted,
    Rejected,
}

impl From<ReviewDecision> for VacancyStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Accepted => VacancyStatus::Accepted,
            ReviewDecision::Rejected => VacancyStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 3] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Internship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExperienceTime {
    #[default]
    #[serde(rename = "No experience")]
    NoExperience,
    #[serde(rename = "1-3 years")]
    OneToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "More than 5 years")]
    MoreThanFiveYears,
}

impl ExperienceTime {
    pub const ALL: [ExperienceTime; 4] = [
        ExperienceTime::NoExperience,
        ExperienceTime::OneToThreeYears,
        ExperienceTime::ThreeToFiveYears,
        ExperienceTime::MoreThanFiveYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceTime::NoExperience => "No experience",
            ExperienceTime::OneToThreeYears => "1-3 years",
            ExperienceTime::ThreeToFiveYears => "3-5 years",
            ExperienceTime::MoreThanFiveYears => "More than 5 years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobFormat {
    #[default]
    Office,
    Remote,
    Hybrid,
}

impl JobFormat {
    pub const ALL: [JobFormat; 3] = [JobFormat::Office, JobFormat::Remote, JobFormat::Hybrid];

    pub fn label(&self) -> &'static str {
        match self {
            JobFormat::Office => "Office",
            JobFormat::Remote => "Remote",
            JobFormat::Hybrid => "Hybrid",
        }
    }
}

macro_rules! labelled_enum_impls {
    ($($ty:ident => $field:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_label($field, s, &$ty::ALL, |v| v.label())
                }
            }
        )*
    };
}

labelled_enum_impls!(
    VacancyStatus => "status",
    EmploymentType => "employment_type",
    ExperienceTime => "experience_time",
    JobFormat => "job_format",
);

/// A vacancy as its owning HR or an administrator sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: i64,
    pub title: String,
    pub position: String,
    pub description: String,
    #[serde(default)]
    pub salary_min: Option<Decimal>,
    #[serde(default)]
    pub salary_max: Option<Decimal>,
    pub location: String,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub experience_time: Option<ExperienceTime>,
    #[serde(default)]
    pub job_format: JobFormat,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: VacancyStatus,
}

impl Vacancy {
    pub fn skill_list(&self) -> Vec<String> {
        split_skills(self.skills.as_deref().unwrap_or_default())
    }
}

/// The applicant-facing projection: every field but the id may be missing
/// and the review status is not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicVacancy {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub salary_min: Option<Decimal>,
    #[serde(default)]
    pub salary_max: Option<Decimal>,
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    #[serde(default)]
    pub experience_time: Option<ExperienceTime>,
    #[serde(default)]
    pub job_format: Option<JobFormat>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionSuggestion {
    pub profession: String,
    #[serde(default)]
    pub grade: String,
}

/// Splits the comma-joined wire form into trimmed, non-empty, unique skills.
pub fn split_skills(joined: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in joined.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}
