use crate::database::entities::{scan_records, sessions};
use crate::database::{db_error, to_offset, to_utc};
use async_trait::async_trait;
use domain::DomainError;
use domain::scan::{
    DeviceId, NewScan, NormalizedAttributes, ScanFilter, ScanListing, ScanRecord, ScanRepository,
};
use domain::session::SessionId;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};
use tracing::error;

pub struct SeaOrmScanRepository {
    db: DatabaseConnection,
}

impl SeaOrmScanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rows that break the record invariants are storage faults, not caller mistakes
    fn model_to_record(model: scan_records::Model) -> Result<ScanRecord, DomainError> {
        let quantity = model
            .quantity
            .map(|q| {
                u32::try_from(q).map_err(|_| {
                    DomainError::Storage(format!(
                        "scan record {} has invalid quantity {}",
                        model.id, q
                    ))
                })
            })
            .transpose()?;

        let device_id = DeviceId::new(&model.device_id).map_err(|e| {
            DomainError::Storage(format!("scan record {} has {}", model.id, e))
        })?;

        Ok(ScanRecord {
            id: model.id,
            device_id,
            attributes: NormalizedAttributes {
                brand: model.brand,
                model: model.model,
                capacity: model.capacity,
                color: model.color,
                grade: model.grade,
                status: model.status,
            },
            quantity,
            created_at: to_utc(model.created_at),
            session_id: SessionId::new(model.session_id),
        })
    }

    /// Constraint violations on insert are expected outcomes, not faults
    fn insert_error(e: DbErr, scan: &NewScan) -> DomainError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateScan {
                device_id: scan.device_id.to_string(),
                session_id: scan.session_id,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                DomainError::SessionNotFound(scan.session_id)
            }
            _ => {
                error!(device_id = %scan.device_id, session_id = %scan.session_id, "Scan insert failed: {}", e);
                db_error(e)
            }
        }
    }

    fn apply_filter(
        select: Select<scan_records::Entity>,
        filter: &ScanFilter,
    ) -> Select<scan_records::Entity> {
        let mut select = select;

        if let Some(needle) = &filter.model_contains {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            // SQLite's LOWER folds ASCII only, so match the column lowercased at insert
            select = select.filter(
                Expr::col((scan_records::Entity, scan_records::Column::ModelSearch))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        if let Some(window) = &filter.created_within {
            select = select.filter(
                Expr::col((scan_records::Entity, scan_records::Column::CreatedAt))
                    .between(to_offset(window.start), to_offset(window.end)),
            );
        }

        select
    }

    fn newest_first(select: Select<scan_records::Entity>) -> Select<scan_records::Entity> {
        select
            .order_by_desc(scan_records::Column::CreatedAt)
            .order_by_desc(scan_records::Column::Id)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ScanRepository for SeaOrmScanRepository {
    async fn insert(&self, scan: &NewScan) -> Result<ScanRecord, DomainError> {
        let attrs = &scan.attributes;
        let active_model = scan_records::ActiveModel {
            id: NotSet,
            device_id: Set(scan.device_id.to_string()),
            brand: Set(attrs.brand.clone()),
            model: Set(attrs.model.clone()),
            model_search: Set(attrs.model.to_lowercase()),
            capacity: Set(attrs.capacity.clone()),
            color: Set(attrs.color.clone()),
            grade: Set(attrs.grade.clone()),
            status: Set(attrs.status.clone()),
            quantity: Set(Some(scan.quantity as i32)),
            created_at: Set(to_offset(scan.created_at)),
            session_id: Set(scan.session_id.value()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| Self::insert_error(e, scan))?;

        Self::model_to_record(model)
    }

    async fn exists(
        &self,
        device_id: &DeviceId,
        session_id: SessionId,
    ) -> Result<bool, DomainError> {
        let count = scan_records::Entity::find()
            .filter(scan_records::Column::DeviceId.eq(device_id.as_str()))
            .filter(scan_records::Column::SessionId.eq(session_id.value()))
            .count(&self.db)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn count_by_session(&self, session_id: SessionId) -> Result<u64, DomainError> {
        scan_records::Entity::find()
            .filter(scan_records::Column::SessionId.eq(session_id.value()))
            .count(&self.db)
            .await
            .map_err(db_error)
    }

    async fn find_by_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ScanRecord>, DomainError> {
        let models = Self::newest_first(
            scan_records::Entity::find()
                .filter(scan_records::Column::SessionId.eq(session_id.value())),
        )
        .all(&self.db)
        .await
        .map_err(db_error)?;

        models.into_iter().map(Self::model_to_record).collect()
    }

    async fn find_latest_by_device(
        &self,
        device_id: &DeviceId,
    ) -> Result<Option<ScanRecord>, DomainError> {
        let model = Self::newest_first(
            scan_records::Entity::find()
                .filter(scan_records::Column::DeviceId.eq(device_id.as_str())),
        )
        .one(&self.db)
        .await
        .map_err(db_error)?;

        model.map(Self::model_to_record).transpose()
    }

    async fn find_matching(
        &self,
        filter: &ScanFilter,
        limit: Option<u64>,
    ) -> Result<Vec<ScanRecord>, DomainError> {
        let models = Self::newest_first(Self::apply_filter(scan_records::Entity::find(), filter))
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        models.into_iter().map(Self::model_to_record).collect()
    }

    async fn list_with_sessions(
        &self,
        filter: &ScanFilter,
    ) -> Result<Vec<ScanListing>, DomainError> {
        let rows = Self::newest_first(Self::apply_filter(scan_records::Entity::find(), filter))
            .find_also_related(sessions::Entity)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut result = Vec::with_capacity(rows.len());
        for (scan, session) in rows {
            let session = session.ok_or_else(|| {
                DomainError::Storage(format!("Scan {} has no session {}", scan.id, scan.session_id))
            })?;
            result.push(ScanListing {
                record: Self::model_to_record(scan)?,
                session_date: to_utc(session.date),
            });
        }
        Ok(result)
    }
}
