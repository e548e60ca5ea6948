pub mod character;
pub mod repository;
pub mod todo;
