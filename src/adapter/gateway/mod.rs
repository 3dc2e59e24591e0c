pub mod error;
pub mod module_repository;
pub mod query_string;
pub mod yaml;
