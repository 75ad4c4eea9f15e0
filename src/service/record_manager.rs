use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::model::employee::{Employee, EmployeeInput};
use crate::model::envelope::{Envelope, FailureKind};
use crate::model::summary::Summary;
use crate::service::export;
use crate::store::EmployeeStore;
use crate::utils::read_cache::ReadCache;
use crate::utils::validator;

pub const EMAIL_IN_USE: &str = "email already in use";
pub const EMAIL_IN_USE_BY_OTHER: &str = "email already in use by another employee";
pub const INSERT_FAILED: &str = "insert failed";
pub const UPDATE_FAILED: &str = "update failed";
pub const DELETE_FAILED: &str = "delete failed";

pub type EmployeeCache = ReadCache<Arc<Vec<Employee>>>;

/// Validates, pre-checks email uniqueness, then issues one write.
///
/// The pre-check and the write are separate statements: two concurrent adds
/// with the same email can both pass the check.
pub struct RecordManager {
    store: Arc<dyn EmployeeStore>,
    cache: EmployeeCache,
}

impl RecordManager {
    pub fn new(store: Arc<dyn EmployeeStore>, cache: EmployeeCache) -> Self {
        Self { store, cache }
    }

    #[instrument(name = "employee_add", skip(self, input), fields(email = %input.email))]
    pub async fn add(&self, input: &EmployeeInput) -> Envelope {
        if let Some(rejected) = self.check(input, None).await {
            return rejected;
        }

        match self.store.insert(input).await {
            Ok(_) => {
                self.cache.invalidate().await;
                info!("Employee added");
                Envelope::success("added")
            }
            Err(e) => {
                error!(error = %e, "Failed to add employee");
                Envelope::single(FailureKind::Storage, INSERT_FAILED)
            }
        }
    }

    #[instrument(name = "employee_update", skip(self, input), fields(email = %input.email))]
    pub async fn update(&self, employee_id: i64, input: &EmployeeInput) -> Envelope {
        if let Some(rejected) = self.check(input, Some(employee_id)).await {
            return rejected;
        }

        match self.store.update(employee_id, input).await {
            Ok(_) => {
                self.cache.invalidate().await;
                info!("Employee updated");
                Envelope::success("updated")
            }
            Err(e) => {
                error!(error = %e, "Failed to update employee");
                Envelope::single(FailureKind::Storage, UPDATE_FAILED)
            }
        }
    }

    #[instrument(name = "employee_delete", skip(self))]
    pub async fn delete(&self, employee_id: i64) -> Envelope {
        match self.store.delete(employee_id).await {
            Ok(0) => {
                warn!("No employee to delete");
                Envelope::single(
                    FailureKind::NotFound,
                    format!("no employee with id {employee_id}"),
                )
            }
            Ok(_) => {
                self.cache.invalidate().await;
                info!("Employee deleted");
                Envelope::success(format!("employee {employee_id} deleted"))
            }
            Err(e) => {
                error!(error = %e, "Failed to delete employee");
                Envelope::single(FailureKind::Storage, DELETE_FAILED)
            }
        }
    }

    /// Full table through the read cache.
    pub async fn list(&self) -> Arc<Vec<Employee>> {
        let store = Arc::clone(&self.store);
        self.cache
            .get_or_load(|| async move { store.load_all().await.map(Arc::new) })
            .await
    }

    pub async fn export_csv(&self) -> Result<Vec<u8>, csv::Error> {
        export::write_csv(&self.list().await)
    }

    pub async fn summary(&self) -> Summary {
        Summary::from_employees(&self.list().await)
    }

    /// Field validation, then the uniqueness pre-check. `None` means the
    /// write may go ahead.
    async fn check(&self, input: &EmployeeInput, exclude_id: Option<i64>) -> Option<Envelope> {
        let errors = validator::validate(input);
        if !errors.is_empty() {
            warn!(?errors, "Employee payload rejected");
            return Some(Envelope::failure(FailureKind::Validation, errors));
        }

        match self.store.email_taken(&input.email, exclude_id).await {
            Ok(false) => None,
            Ok(true) => {
                warn!("Email already in use");
                let message = if exclude_id.is_some() {
                    EMAIL_IN_USE_BY_OTHER
                } else {
                    EMAIL_IN_USE
                };
                Some(Envelope::single(FailureKind::Conflict, message))
            }
            Err(e) => {
                error!(error = %e, "Email uniqueness check failed");
                Some(Envelope::single(FailureKind::Storage, e.to_string()))
            }
        }
    }
}
