#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "Server side: in-memory account and task stores, session tokens, the bearer gate,"]
#![doc = "error mapping and the HTTP routes. Client side: a session context with persisted"]
#![doc = "storage, an API client and the board/table views built on top of it."]
#![doc = "The binary (`main.rs`) wires the server pieces together."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::models::{Task, TaskStatus};
