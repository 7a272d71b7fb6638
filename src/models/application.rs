use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApplicationStatus {
    #[default]
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "accepted", alias = "ACCEPTED")]
    Accepted,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Only pending applications can still be accepted or rejected.
    pub fn is_open(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An application as the vacancy's HR sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub application_id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub matching_score: Option<f64>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub summary: String,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// An application as the applicant sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserApplication {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub vacancy_title: String,
    #[serde(default)]
    pub matching_score: Option<f64>,
}
