//! Rule store errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleStoreError {
    #[error("storage error")]
    Sql(#[from] Error),

    #[error("invalid {table} record {uuid}: {reason}")]
    InvalidRecord {
        table: &'static str,
        uuid: uuid::Uuid,
        reason: String,
    },
}
