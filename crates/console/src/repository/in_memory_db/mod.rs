pub mod collection;
pub mod permission_repo;
pub mod role_repo;
pub mod user_repo;
