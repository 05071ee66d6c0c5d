//! Catalog - Signal Catalog Search and Administration
//!
//! Everything around the matcher: the record store and identity provider
//! seams (with in-memory, file and HTTP implementations), explicit session
//! state driven by a reducer, route access rules, and the `catalog` CLI.

pub mod access;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod service;
pub mod state;
pub mod store;

pub use error::{CatalogError, Result};
pub use service::Catalog;
