//! Preview store
//!
//! A small HTTP service that stores uploaded files in named folders under a
//! fixed root directory and deletes them again on request.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{PreviewError, Result};
pub use file::ScopedFileStore;
pub use web::WebServer;
