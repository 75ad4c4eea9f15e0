pub mod employee;
pub mod envelope;
pub mod summary;
