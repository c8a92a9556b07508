pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod web;

/// Set by build.rs so a running server can be matched to its binary.
pub const BUILD_ID: &str = env!("HOOPNIGHT_BUILD_ID");
