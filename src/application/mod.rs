pub mod feed_use_case;
pub mod todo_use_case;
