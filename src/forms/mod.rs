//! Client-side form state and validation for vacancy editing.

pub mod salary;
pub mod skills;
pub mod vacancy_form;
pub mod wizard;

pub use salary::{check_salary_range, group_thousands, SalaryInput, SALARY_RANGE_MESSAGE};
pub use skills::SkillsInput;
pub use vacancy_form::VacancyForm;
pub use wizard::{ClassifyTicket, ProfessionClassifier, VacancyWizard, WizardStep};
