use crate::database::entities::{scan_records, sessions};
use crate::database::{db_error, to_offset, to_utc};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::DomainError;
use domain::session::{Session, SessionId, SessionOverview, SessionRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

pub struct SeaOrmSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_session(model: sessions::Model) -> Result<Session, DomainError> {
        Ok(Session {
            id: SessionId::new(model.id),
            date: to_utc(model.date),
            created_at: to_utc(model.created_at),
        })
    }

    async fn scan_counts(&self) -> Result<HashMap<i32, u64>, DomainError> {
        let rows: Vec<(i32, i64)> = scan_records::Entity::find()
            .select_only()
            .column(scan_records::Column::SessionId)
            .column_as(scan_records::Column::Id.count(), "scan_count")
            .group_by(scan_records::Column::SessionId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(session_id, count)| (session_id, count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl SessionRepository for SeaOrmSessionRepository {
    async fn create(&self, now: DateTime<Utc>) -> Result<Session, DomainError> {
        let now_offset = to_offset(now);

        let active_model = sessions::ActiveModel {
            id: NotSet,
            date: Set(now_offset),
            created_at: Set(now_offset),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Self::model_to_session(model)
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        let model = sessions::Entity::find_by_id(id.value())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(Self::model_to_session).transpose()
    }

    async fn list_with_counts(&self) -> Result<Vec<SessionOverview>, DomainError> {
        let models = sessions::Entity::find()
            .order_by_desc(sessions::Column::CreatedAt)
            .order_by_desc(sessions::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let counts = self.scan_counts().await?;

        let mut result = Vec::with_capacity(models.len());
        for m in models {
            let scan_count = counts.get(&m.id).copied().unwrap_or(0);
            result.push(SessionOverview {
                session: Self::model_to_session(m)?,
                scan_count,
            });
        }
        Ok(result)
    }

    async fn find_latest_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError> {
        let model = sessions::Entity::find()
            .filter(sessions::Column::Date.gte(to_offset(since)))
            .order_by_desc(sessions::Column::CreatedAt)
            .order_by_desc(sessions::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        model.map(Self::model_to_session).transpose()
    }

    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Session>, DomainError> {
        let models = sessions::Entity::find()
            .filter(sessions::Column::Date.gte(to_offset(since)))
            .order_by_asc(sessions::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        models.into_iter().map(Self::model_to_session).collect()
    }
}
