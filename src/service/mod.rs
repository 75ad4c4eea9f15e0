pub mod export;
pub mod record_manager;
