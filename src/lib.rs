//! Backend service bootstrap for the task queue.
//!
//! The process owns two things: a long-lived Redis connection that the
//! queue components dispatch against, and an HTTP application with
//! cross-origin and JSON middleware that the job endpoints will be
//! registered on. Redis being down is not fatal; the connection error is
//! classified, logged, and reflected in the connector's status while the
//! HTTP service keeps running.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`connector`]: Long-lived Redis connection handle
//! - [`error`]: Connection error classification
//! - [`api`]: HTTP application assembly
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod connector;
pub mod error;
pub mod utils;

pub use config::Config;
pub use connector::{ConnectionStatus, RedisConnector};
pub use error::ConnectorError;
