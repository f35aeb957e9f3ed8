//! Linkbox - a personal short-link manager
//!
//! Maps short codes to target URLs, redirects visitors, records visit
//! counts and exposes a password-gated management API over a flat
//! key-value store.
//!
//! # Architecture
//! - `middleware`: request dispatch (static / API / frontend / short code)
//! - `services`: login, link CRUD, redirect resolution, visit counting
//! - `storage`: key-value store adapter and backends
//! - `config`: environment-driven configuration
//! - `errors`: error taxonomy

pub mod config;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod storage;
pub mod utils;
