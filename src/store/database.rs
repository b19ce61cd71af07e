use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, Select};
use tracing::instrument;
use crate::entity::bug::{self, ActiveModel as BugActiveModel, BugFields, Entity as BugEntity, Model as BugModel};
use crate::service::query::{BugFilter, SortDirection, SortKey};
use super::{new_id, BugStore, StoreError};

/// `BugStore` over a sea-orm connection (MySQL or SQLite).
#[derive(Clone)]
pub struct SeaOrmBugStore {
    db: DatabaseConnection,
}

impl SeaOrmBugStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn order_by(query: Select<BugEntity>, sort_key: &SortKey, order: Order) -> Select<BugEntity> {
    match sort_key.column() {
        Some(column) => query.order_by(column, order),
        // not a column; leave the engine's natural order
        None => query,
    }
}

#[async_trait::async_trait]
impl BugStore for SeaOrmBugStore {
    #[instrument(skip(self))]
    async fn find_all(
        &self,
        filter: &BugFilter,
        sort_key: &SortKey,
        direction: SortDirection,
    ) -> Result<Vec<BugModel>, StoreError> {
        let mut condition = Condition::all();
        if let Some(status) = &filter.status {
            condition = condition.add(bug::Column::Status.eq(status.as_str()));
        }
        if let Some(severity) = &filter.severity {
            condition = condition.add(bug::Column::Severity.eq(severity.as_str()));
        }

        let query = BugEntity::find().filter(condition);
        let bugs = order_by(query, sort_key, direction.into())
            .all(&self.db)
            .await?;

        Ok(bugs)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BugModel>, StoreError> {
        let bug = BugEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;

        Ok(bug)
    }

    #[instrument(skip(self, fields))]
    async fn insert(&self, fields: BugFields, now: DateTime<Utc>) -> Result<BugModel, StoreError> {
        let new_bug = BugActiveModel::from_fields(new_id(), fields, now);
        let inserted = new_bug.insert(&self.db).await?;

        Ok(inserted)
    }

    #[instrument(skip(self, fields))]
    async fn replace(
        &self,
        id: &str,
        fields: BugFields,
        now: DateTime<Utc>,
    ) -> Result<Option<BugModel>, StoreError> {
        let Some(existing) = BugEntity::find_by_id(id.to_string()).one(&self.db).await? else {
            return Ok(None);
        };

        let mut bug_model: BugActiveModel = existing.into();
        bug_model.replace_fields(fields, now);
        let updated = bug_model.update(&self.db).await?;

        Ok(Some(updated))
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = BugEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
