pub mod in_memory_db;
pub mod permission_repo;
pub mod role_repo;
pub mod seed;
pub mod user_repo;
