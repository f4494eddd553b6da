use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::DomainResult;
use domain::models::{OperationRecord, OperationType};
use domain::repositories::OperationRecordRepository;

use crate::errors::DbError;
use crate::models::operation_record::operation_type_to_string;
use crate::models::OperationRecordDb;

pub struct SqlxOperationRecordRepository {
    pool: PgPool,
}

impl SqlxOperationRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperationRecordRepository for SqlxOperationRecordRepository {
    async fn create(&self, record: &OperationRecord) -> DomainResult<OperationRecord> {
        let db = OperationRecordDb::from_domain(record);

        let row = sqlx::query_as!(
            OperationRecordDb,
            r#"
            INSERT INTO operation_records
                (idempotency_key, user_id, operation_type, draft_id, result, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING idempotency_key, user_id, operation_type, draft_id,
                      result as "result: _", created_at, expires_at
            "#,
            db.idempotency_key,
            db.user_id,
            db.operation_type,
            db.draft_id,
            db.result as _,
            db.created_at,
            db.expires_at,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        Ok(row.to_domain()?)
    }

    async fn find(
        &self,
        idempotency_key: &str,
        user_id: Uuid,
        operation_type: OperationType,
    ) -> DomainResult<Option<OperationRecord>> {
        let op_str = operation_type_to_string(&operation_type);

        let row = sqlx::query_as!(
            OperationRecordDb,
            r#"
            SELECT idempotency_key, user_id, operation_type, draft_id,
                   result as "result: _", created_at, expires_at
            FROM operation_records
            WHERE idempotency_key = $1 AND user_id = $2 AND operation_type = $3
            "#,
            idempotency_key,
            user_id,
            op_str
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::DatabaseError)?;

        match row {
            Some(r) => Ok(Some(r.to_domain()?)),
            None => Ok(None),
        }
    }

    async fn delete_expired(&self) -> DomainResult<u64> {
        let result = sqlx::query!("DELETE FROM operation_records WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(DbError::DatabaseError)?;

        Ok(result.rows_affected())
    }
}
