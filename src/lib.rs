//! shrinkr - a minimal single-node URL shortener.
//!
//! Maps long URLs to fixed-length short codes and resolves them back,
//! tracking an access count per mapping. Three operations: shorten,
//! resolve, stats. Storage is behind the [`store::UrlStore`] trait with
//! Postgres and in-memory implementations.

pub mod codes;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;
