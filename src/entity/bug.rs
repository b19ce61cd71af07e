use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bugs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub reporter: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub assignee: Option<String>,
    pub severity: Severity,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[sea_orm(string_value = "low")]
    Low,
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "critical")]
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// The mutable part of a bug record, already sanitized and validated.
/// Stores replace all of these at once.
#[derive(Clone, Debug, PartialEq)]
pub struct BugFields {
    pub title: String,
    pub description: String,
    pub reporter: String,
    pub assignee: Option<String>,
    pub severity: Severity,
    pub status: Status,
}

impl ActiveModel {
    pub fn from_fields(id: String, fields: BugFields, now: DateTime<Utc>) -> Self {
        let mut model = Self {
            id: Set(id),
            created_at: Set(now),
            ..Default::default()
        };
        model.replace_fields(fields, now);
        model
    }

    pub fn replace_fields(&mut self, fields: BugFields, now: DateTime<Utc>) {
        self.title = Set(fields.title);
        self.description = Set(fields.description);
        self.reporter = Set(fields.reporter);
        self.assignee = Set(fields.assignee);
        self.severity = Set(fields.severity);
        self.status = Set(fields.status);
        self.updated_at = Set(now);
    }
}

impl Model {
    pub fn from_fields(id: String, fields: BugFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            reporter: fields.reporter,
            assignee: fields.assignee,
            severity: fields.severity,
            status: fields.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn replace_fields(&mut self, fields: BugFields, now: DateTime<Utc>) {
        self.title = fields.title;
        self.description = fields.description;
        self.reporter = fields.reporter;
        self.assignee = fields.assignee;
        self.severity = fields.severity;
        self.status = fields.status;
        self.updated_at = now;
    }
}
