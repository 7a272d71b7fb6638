use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// The résumé parser returns some fields as plain text on one endpoint and as
/// lists or maps on another; flatten all of them into display text.
fn deserialize_text_flexible<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| flatten_text(&v)))
}

fn flatten_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_text).collect();
            Some(parts.join(", "))
        }
        JsonValue::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| match flatten_text(v) {
                    Some(text) => format!("{}: {}", k, text),
                    None => k.clone(),
                })
                .collect();
            Some(parts.join(", "))
        }
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub experience_time: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_text_flexible")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_flexible")]
    pub languages: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_flexible")]
    pub education: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub min_salary: Option<f64>,
    #[serde(default)]
    pub max_salary: Option<f64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub resume_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Analysis of a résumé against one vacancy, including the backend's
/// matching score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessedResume {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_time: Option<f64>,
    pub profession: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub languages: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub education: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub skills: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub awards: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub projects: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub courses: Option<String>,
    pub summary: Option<String>,
    pub grade: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub resume_link: Option<String>,
    pub matching_score: Option<f64>,
    pub reason: Option<String>,
    pub resume_path: Option<String>,
    #[serde(deserialize_with = "deserialize_text_flexible")]
    pub keywords: Option<String>,
}
