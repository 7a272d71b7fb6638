use validator::ValidationErrors;

use super::salary::{check_salary_range, SalaryInput};
use super::skills::SkillsInput;
use crate::dto::vacancy_dto::VacancyPayload;
use crate::models::vacancy::{EmploymentType, ExperienceTime, JobFormat, Vacancy, VacancyStatus};
use crate::utils::validation;

const REQUIRED_MESSAGE: &str = "Обязательное поле";

/// Structured vacancy fields as the HR edits them, before they become a
/// request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyForm {
    pub title: String,
    pub position: String,
    pub description: String,
    pub location: String,
    pub salary_min: SalaryInput,
    pub salary_max: SalaryInput,
    pub employment_type: Option<EmploymentType>,
    pub experience_time: Option<ExperienceTime>,
    pub job_format: Option<JobFormat>,
    pub skills: SkillsInput,
    pub telegram: String,
    pub whatsapp: String,
    pub email: String,
    /// Status of the vacancy being edited; new vacancies start under review.
    pub status: VacancyStatus,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl VacancyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vacancy(vacancy: &Vacancy) -> Self {
        Self {
            title: vacancy.title.clone(),
            position: vacancy.position.clone(),
            description: vacancy.description.clone(),
            location: vacancy.location.clone(),
            salary_min: SalaryInput::from_amount(vacancy.salary_min),
            salary_max: SalaryInput::from_amount(vacancy.salary_max),
            employment_type: Some(vacancy.employment_type),
            experience_time: vacancy.experience_time,
            job_format: Some(vacancy.job_format),
            skills: SkillsInput::from_joined(vacancy.skills.as_deref().unwrap_or_default()),
            telegram: vacancy.telegram.clone().unwrap_or_default(),
            whatsapp: vacancy.whatsapp.clone().unwrap_or_default(),
            email: vacancy.email.clone().unwrap_or_default(),
            status: vacancy.status,
        }
    }

    /// The inline message under the salary fields, if any.
    pub fn salary_error(&self) -> Option<&'static str> {
        check_salary_range(self.salary_min.amount(), self.salary_max.amount()).err()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                errors.add(field, validation::error("required", REQUIRED_MESSAGE));
            }
        }
        if let Some(message) = self.salary_error() {
            errors.add("salary_min", validation::error("salary_range", message));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates and produces the body for create or update. Text is trimmed,
    /// unset selects fall back to their defaults, blank contacts are omitted.
    pub fn to_payload(&self) -> Result<VacancyPayload, ValidationErrors> {
        self.validate()?;
        Ok(VacancyPayload {
            title: self.title.trim().to_string(),
            position: self.position.trim().to_string(),
            description: self.description.trim().to_string(),
            salary_min: self.salary_min.amount(),
            salary_max: self.salary_max.amount(),
            location: self.location.trim().to_string(),
            employment_type: self.employment_type.unwrap_or_default(),
            experience_time: self.experience_time.unwrap_or_default(),
            job_format: self.job_format.unwrap_or_default(),
            skills: self.skills.to_joined(),
            telegram: non_empty(&self.telegram),
            whatsapp: non_empty(&self.whatsapp),
            email: non_empty(&self.email),
            status: self.status,
        })
    }
}
