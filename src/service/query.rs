use std::str::FromStr;
use sea_orm::Order;
use crate::entity::bug;
use crate::model::bug::BugQuery;

/// Exact-match clauses. `None` places no constraint on the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BugFilter {
    pub status: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Title,
    Severity,
    Status,
    /// Unrecognised key, handed to the store verbatim.
    Other(String),
}

impl SortKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "createdAt" => SortKey::CreatedAt,
            "updatedAt" => SortKey::UpdatedAt,
            "title" => SortKey::Title,
            "severity" => SortKey::Severity,
            "status" => SortKey::Status,
            other => SortKey::Other(other.to_string()),
        }
    }

    /// The record column to order by. Pass-through keys resolve when they
    /// name a column (camelCase or snake_case); anything else means no
    /// ordering.
    pub fn column(&self) -> Option<bug::Column> {
        match self {
            SortKey::CreatedAt => Some(bug::Column::CreatedAt),
            SortKey::UpdatedAt => Some(bug::Column::UpdatedAt),
            SortKey::Title => Some(bug::Column::Title),
            SortKey::Severity => Some(bug::Column::Severity),
            SortKey::Status => Some(bug::Column::Status),
            SortKey::Other(name) => bug::Column::from_str(name).ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the literal `asc` sorts ascending.
    pub fn parse(order: Option<&str>) -> Self {
        match order {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugListQuery {
    pub filter: BugFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

pub fn build_query(params: &BugQuery) -> BugListQuery {
    BugListQuery {
        filter: BugFilter {
            status: non_empty(&params.status),
            severity: non_empty(&params.severity),
        },
        sort_key: non_empty(&params.sort_by)
            .map(|key| SortKey::parse(&key))
            .unwrap_or(SortKey::CreatedAt),
        direction: SortDirection::parse(params.order.as_deref()),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
