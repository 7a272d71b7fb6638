use async_trait::async_trait;
use tracing::{debug, info};

use super::vacancy_form::VacancyForm;
use crate::dto::vacancy_dto::VacancyPayload;
use crate::error::{Error, Result};
use crate::models::vacancy::{ProfessionSuggestion, Vacancy};
use crate::utils::{ScopeTicket, ViewScope};

/// Remote service that proposes professions and grades for a free-text job
/// description.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfessionClassifier: Send + Sync {
    async fn classify(&self, description: &str) -> Result<Vec<ProfessionSuggestion>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    DescribingJob,
    ChoosingProfession,
    EditingStructuredFields,
}

/// Handed out when classification starts; the result is only applied if the
/// wizard has not moved on in the meantime.
#[derive(Debug, Clone)]
pub struct ClassifyTicket {
    description: String,
    scope: ScopeTicket,
}

impl ClassifyTicket {
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Describe the job, pick one of the suggested professions, then fill in the
/// structured fields.
#[derive(Debug, Clone)]
pub struct VacancyWizard {
    step: WizardStep,
    form: VacancyForm,
    /// Set when editing an existing vacancy.
    vacancy_id: Option<i64>,
    suggestions: Vec<ProfessionSuggestion>,
    selected: Option<usize>,
    scope: ViewScope,
    awaiting: Option<ScopeTicket>,
}

impl Default for VacancyWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl VacancyWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::DescribingJob,
            form: VacancyForm::new(),
            vacancy_id: None,
            suggestions: Vec::new(),
            selected: None,
            scope: ViewScope::new(),
            awaiting: None,
        }
    }

    /// Starts over an existing vacancy, with every field pre-filled.
    pub fn editing(vacancy: &Vacancy) -> Self {
        Self {
            form: VacancyForm::from_vacancy(vacancy),
            vacancy_id: Some(vacancy.id),
            ..Self::new()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn vacancy_id(&self) -> Option<i64> {
        self.vacancy_id
    }

    pub fn form(&self) -> &VacancyForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut VacancyForm {
        &mut self.form
    }

    pub fn suggestions(&self) -> &[ProfessionSuggestion] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&ProfessionSuggestion> {
        self.selected.and_then(|i| self.suggestions.get(i))
    }

    pub fn is_classifying(&self) -> bool {
        self.awaiting
            .is_some_and(|ticket| self.scope.is_current(ticket))
    }

    fn expect_step(&self, expected: WizardStep) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(Error::Wizard(format!(
                "Action not available at step {:?}",
                self.step
            )))
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.expect_step(WizardStep::DescribingJob)?;
        self.form.description = description.into();
        Ok(())
    }

    pub fn begin_classify(&mut self) -> Result<ClassifyTicket> {
        self.expect_step(WizardStep::DescribingJob)?;
        if self.is_classifying() {
            return Err(Error::Busy("classify"));
        }
        let description = self.form.description.trim();
        if description.is_empty() {
            return Err(Error::invalid("description", "Опишите вакансию"));
        }
        let ticket = ClassifyTicket {
            description: description.to_string(),
            scope: self.scope.ticket(),
        };
        self.awaiting = Some(ticket.scope);
        Ok(ticket)
    }

    /// Applies a classification result. Returns `Ok(false)` when the result
    /// was stale and dropped.
    pub fn finish_classify(
        &mut self,
        ticket: ClassifyTicket,
        result: Result<Vec<ProfessionSuggestion>>,
    ) -> Result<bool> {
        if !self.scope.is_current(ticket.scope) || self.step != WizardStep::DescribingJob {
            debug!("Dropping stale classification result");
            return Ok(false);
        }
        self.awaiting = None;
        let suggestions = result?;
        info!(count = suggestions.len(), "Profession suggestions received");
        self.suggestions = suggestions;
        self.selected = None;
        self.step = WizardStep::ChoosingProfession;
        Ok(true)
    }

    pub async fn classify(&mut self, classifier: &dyn ProfessionClassifier) -> Result<bool> {
        let ticket = self.begin_classify()?;
        let result = classifier.classify(ticket.description()).await;
        self.finish_classify(ticket, result)
    }

    /// Pre-fills title and position from the chosen suggestion.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.expect_step(WizardStep::ChoosingProfession)?;
        let suggestion = self
            .suggestions
            .get(index)
            .ok_or_else(|| Error::Wizard(format!("No suggestion number {}", index + 1)))?;
        self.form.title = suggestion.profession.clone();
        self.form.position = suggestion.grade.clone();
        self.selected = Some(index);
        self.step = WizardStep::EditingStructuredFields;
        Ok(())
    }

    /// One step back. Leaving the profession list discards the suggestions
    /// and any classification still running.
    pub fn go_back(&mut self) {
        match self.step {
            WizardStep::DescribingJob => {
                if self.awaiting.take().is_some() {
                    self.scope.invalidate();
                }
            }
            WizardStep::ChoosingProfession => {
                self.scope.invalidate();
                self.awaiting = None;
                self.suggestions.clear();
                self.selected = None;
                self.step = WizardStep::DescribingJob;
            }
            WizardStep::EditingStructuredFields => {
                self.step = WizardStep::ChoosingProfession;
            }
        }
    }

    /// Validated request body, ready for create or update.
    pub fn submit(&self) -> Result<VacancyPayload> {
        self.expect_step(WizardStep::EditingStructuredFields)?;
        let payload = self.form.to_payload()?;
        Ok(match self.vacancy_id {
            Some(_) => payload.for_update(),
            None => payload.for_creation(),
        })
    }
}
