use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeInput};
use crate::store::EmployeeStore;

/// In-memory table for tests. Counts writes and loads, and can be told to
/// fail every write or every email check. Like the real table it has no unique constraint on email.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Employee>>,
    next_id: Mutex<i64>,
    writes: AtomicUsize,
    loads: AtomicUsize,
    fail_writes: AtomicBool,
    fail_checks: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_checks(&self, fail: bool) {
        self.fail_checks.store(fail, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Employee> {
        self.rows.lock().expect("memory store poisoned").clone()
    }

    fn begin_write(&self) -> Result<(), DbError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Query("write rejected".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DbError> {
        if self.fail_checks.load(Ordering::SeqCst) {
            return Err(DbError::Connection("down".to_string()));
        }
        let rows = self.rows.lock().expect("memory store poisoned");
        Ok(rows
            .iter()
            .any(|e| e.email == email && Some(e.id) != exclude_id))
    }

    async fn insert(&self, input: &EmployeeInput) -> Result<u64, DbError> {
        self.begin_write()?;
        let id = {
            let mut next_id = self.next_id.lock().expect("memory store poisoned");
            *next_id += 1;
            *next_id
        };
        self.rows
            .lock()
            .expect("memory store poisoned")
            .push(Employee::from_input(id, input));
        Ok(1)
    }

    async fn update(&self, id: i64, input: &EmployeeInput) -> Result<u64, DbError> {
        self.begin_write()?;
        let mut rows = self.rows.lock().expect("memory store poisoned");
        match rows.iter_mut().find(|e| e.id == id) {
            Some(row) => {
                *row = Employee::from_input(id, input);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        self.begin_write()?;
        let mut rows = self.rows.lock().expect("memory store poisoned");
        let before = rows.len();
        rows.retain(|e| e.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn load_all(&self) -> Result<Vec<Employee>, DbError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows())
    }
}
