//! Meet Assist - Authenticated procedure dispatch
//!
//! Callers invoke named procedures over a single RPC endpoint. Each procedure
//! is public or protected; protected ones run only for a caller with a live
//! session and see that caller's identity. The agent procedures let a user
//! create, fetch, and list the meeting assistants they own.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
