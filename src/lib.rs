// ABOUTME: Library root for tether - exposes the API client, manifests, and link orchestrator.
// ABOUTME: The main binary is in main.rs.

pub mod api;
pub mod config;
pub mod containers;
pub mod context;
pub mod error;
pub mod link;
pub mod projects;
pub mod scaffold;
