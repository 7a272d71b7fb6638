use serde::{Deserialize, Serialize};

/// Applicant account as listed for an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub blocked: bool,
}

/// HR account as listed for an administrator. Usable only once approved and
/// while not blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrAccount {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub company: String,
}

impl HrAccount {
    pub fn can_log_in(&self) -> bool {
        self.approved && !self.blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrProfile {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub full_name: String,
}
