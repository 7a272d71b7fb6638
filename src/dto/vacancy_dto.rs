use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::vacancy::{
    EmploymentType, ExperienceTime, JobFormat, ProfessionSuggestion, ReviewDecision,
    VacancyStatus,
};

/// Body of the HR create and update calls, as produced by the vacancy form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyPayload {
    pub title: String,
    pub position: String,
    pub description: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub location: String,
    pub employment_type: EmploymentType,
    pub experience_time: ExperienceTime,
    pub job_format: JobFormat,
    pub skills: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: VacancyStatus,
}

impl VacancyPayload {
    /// New postings always enter review.
    pub fn for_creation(self) -> Self {
        Self {
            status: VacancyStatus::UnderReview,
            ..self
        }
    }

    pub fn for_update(self) -> Self {
        Self {
            status: self.status.after_hr_edit(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    pub status: ReviewDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub professions: Vec<ProfessionSuggestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HrProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}
