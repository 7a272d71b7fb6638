use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateApplicationResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub application_id: i64,
    #[serde(default)]
    pub matching_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserIdBody {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HrIdBody {
    pub hr_id: i64,
}
