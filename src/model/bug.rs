use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use crate::entity::bug::{Model as BugModel, Severity, Status};
use crate::util::sanitize::sanitize_input;

/// Body of `POST /api/bugs` and `PUT /api/bugs/{id}`.
///
/// Fields stay loosely typed until validation so that a wrong type is
/// reported as a validation message rather than a body parse error.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct BugRequest {
    #[schema(value_type = Option<String>, example = "Login button unresponsive")]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub reporter: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub assignee: Option<Value>,
    #[schema(value_type = Option<Severity>)]
    pub severity: Option<Value>,
    #[schema(value_type = Option<Status>)]
    pub status: Option<Value>,
}

impl BugRequest {
    /// Sanitizes the free-text fields. Severity and status are left as sent.
    pub fn sanitized(self) -> Self {
        Self {
            title: self.title.map(sanitize_input),
            description: self.description.map(sanitize_input),
            reporter: self.reporter.map(sanitize_input),
            assignee: self.assignee.map(sanitize_input),
            severity: self.severity,
            status: self.status,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BugQuery {
    /// Exact-match status filter
    pub status: Option<String>,
    /// Exact-match severity filter
    pub severity: Option<String>,
    /// createdAt (default), updatedAt, title, severity or status
    pub sort_by: Option<String>,
    /// `asc`, anything else sorts descending
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BugResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reporter: String,
    pub assignee: Option<String>,
    pub severity: Severity,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BugModel> for BugResponse {
    fn from(model: BugModel) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            reporter: model.reporter,
            assignee: model.assignee,
            severity: model.severity,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
