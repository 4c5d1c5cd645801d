//! httplog - register a canned response under a key, replay it on every GET,
//! and keep a pseudonymized log of who asked for it.
//!
//! - `fingerprint`: sha256 of caller addresses, nothing raw is persisted
//! - `db`: SQLite store with the `endpoints` and `requests` tables
//! - `registry` / `request_log`: the two components handlers compose
//! - `handlers`: axum routes

pub mod config;
pub mod db;
pub mod error;
pub mod fingerprint;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod request_log;
pub mod state;

pub use self::db::Store;
pub use self::error::{Error, Result};
pub use self::handlers::{router, trim_trailing_slash};
pub use self::state::AppState;
