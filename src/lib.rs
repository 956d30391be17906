//! Article service
//!
//! Serves the blog's article list, article detail with server-side Markdown
//! rendering, and the authenticated create / update / delete flows. Identity
//! comes from the platform's identity provider as a bearer token; this crate
//! only validates tokens and enforces article ownership.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
