// ABOUTME: Library root for berth: declarative container reconciliation.
// ABOUTME: The command-line driver lives in main.rs.

pub mod config;
pub mod diff;
pub mod error;
pub mod flatten;
pub mod output;
pub mod reconcile;
pub mod runtime;
pub mod translate;
pub mod types;
