//! Web API module for the preview store.
//!
//! A thin HTTP adapter over [`crate::file::ScopedFileStore`]: multipart
//! upload, JSON delete, CORS and request tracing.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
