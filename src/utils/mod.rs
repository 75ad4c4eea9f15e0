pub mod db_utils;
pub mod read_cache;
pub mod validator;
