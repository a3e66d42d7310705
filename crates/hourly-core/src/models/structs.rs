use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.is_staff || self.role.as_deref() == Some("admin")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub id: i64,
    pub project: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub activity: Option<i64>,
    #[serde(default)]
    pub activity_name: Option<String>,
    pub date: NaiveDate,
    #[serde(deserialize_with = "hours_from_number_or_string")]
    pub hours: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TimesheetEntry {
    pub fn project_label(&self) -> String {
        self.project_name
            .clone()
            .unwrap_or_else(|| format!("project #{}", self.project))
    }

    pub fn is_submitted(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some("submitted") | Some("approved")
        )
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct TimesheetEntryRequest {
    pub project: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<i64>,
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SubmitWeekRequest {
    pub week_start_date: NaiveDate,
    pub force_submit: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SubmitWeekResponse {
    #[serde(default)]
    pub can_force_submit: bool,
    #[serde(default)]
    pub week_warnings: Vec<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Serialize, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct ProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectAssignment {
    #[serde(default)]
    pub id: Option<i64>,
    pub user: i64,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AssignUsersRequest {
    pub user_ids: Vec<i64>,
}

/// List endpoints answer either a bare array or a DRF page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Page { results } => results,
            Self::Plain(items) => items,
        }
    }
}

fn hours_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hours {
        Number(f64),
        Text(String),
    }

    match Hours::deserialize(deserializer)? {
        Hours::Number(value) => Ok(value),
        Hours::Text(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid hours: {value}"))),
    }
}
