//! State and data-access core of the Momentum client: a character feed
//! fetched over HTTP and a locally persisted to-do list, each exposed to the
//! rendering layer through a view-model.

pub mod application;
pub mod builder;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
