pub mod feed_repo;
pub mod memory_repo;
pub mod network;
pub mod sqlite_repo;
