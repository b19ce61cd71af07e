use std::sync::Arc;
use chrono::Utc;
use sea_orm::ActiveEnum;
use serde_json::Value;
use tracing::{info, instrument};
use crate::entity::bug::{BugFields, Model as BugModel, Severity, Status};
use crate::model::bug::{BugQuery, BugRequest};
use crate::model::global_error::{AppError, ErrorCode};
use crate::service::query::build_query;
use crate::store::BugStore;
use crate::util::validation::validate_bug;

/// Create/read/update/delete for bug records.
///
/// Holds nothing but the injected store; every call is independent and
/// concurrent updates to the same id are last-write-wins.
#[derive(Clone)]
pub struct BugService {
    store: Arc<dyn BugStore>,
}

impl BugService {
    pub fn new(store: Arc<dyn BugStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: BugRequest) -> Result<BugModel, AppError> {
        let fields = prepare(request)?;
        let bug = self.store.insert(fields, Utc::now()).await?;

        info!(bug_id = %bug.id, "bug created");
        Ok(bug)
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self, params: &BugQuery) -> Result<Vec<BugModel>, AppError> {
        let query = build_query(params);
        let bugs = self
            .store
            .find_all(&query.filter, &query.sort_key, query.direction)
            .await?;

        Ok(bugs)
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> Result<BugModel, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: BugRequest) -> Result<BugModel, AppError> {
        self.get_one(id).await?;

        let fields = prepare(request)?;
        let bug = self
            .store
            .replace(id, fields, Utc::now())
            .await?
            .ok_or_else(AppError::not_found)?;

        info!(bug_id = %bug.id, "bug updated");
        Ok(bug)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.get_one(id).await?;

        if !self.store.remove(id).await? {
            return Err(AppError::not_found());
        }

        info!(bug_id = %id, "bug deleted");
        Ok(())
    }
}

/// Sanitizes and validates a request into the full set of mutable fields.
fn prepare(request: BugRequest) -> Result<BugFields, AppError> {
    let candidate = request.sanitized();

    let validation = validate_bug(&candidate);
    if !validation.is_valid {
        return Err(AppError::ValidationError(validation.errors));
    }

    Ok(BugFields {
        title: required_text(candidate.title)?,
        description: required_text(candidate.description)?,
        reporter: required_text(candidate.reporter)?,
        assignee: optional_text(candidate.assignee),
        severity: enum_or_default::<Severity>(candidate.severity)?,
        status: enum_or_default::<Status>(candidate.status)?,
    })
}

fn required_text(value: Option<Value>) -> Result<String, AppError> {
    match value {
        Some(Value::String(text)) => Ok(text),
        _ => Err(AppError::with_detail(ErrorCode::InternalError, "validated field is not text")),
    }
}

// non-text assignees are stored as their JSON text
fn optional_text(value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    }
}

fn enum_or_default<E>(value: Option<Value>) -> Result<E, AppError>
where
    E: ActiveEnum<Value = String> + Default,
{
    match value {
        Some(Value::String(text)) if !text.is_empty() => E::try_from_value(&text)
            .map_err(|err| AppError::with_detail(ErrorCode::InternalError, err.to_string())),
        _ => Ok(E::default()),
    }
}
