//! View-models: the state the rendering layer observes and the commands it
//! may invoke. The rendering layer never writes state directly.

pub mod feed_view_model;
pub mod todo_view_model;
