use async_trait::async_trait;

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeInput};

pub mod mysql;

#[cfg(test)]
pub mod memory;

/// Persistence operations behind the record manager.
///
/// Write methods return the number of affected rows.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// True when another record already uses `email`. `exclude_id` skips the
    /// record being updated.
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DbError>;

    async fn insert(&self, input: &EmployeeInput) -> Result<u64, DbError>;

    async fn update(&self, id: i64, input: &EmployeeInput) -> Result<u64, DbError>;

    async fn delete(&self, id: i64) -> Result<u64, DbError>;

    /// Whole table, ordered by id.
    async fn load_all(&self) -> Result<Vec<Employee>, DbError>;
}
