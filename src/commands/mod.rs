// ABOUTME: Command handlers wiring CLI arguments to library operations.
// ABOUTME: Each handler resolves context and configuration, then talks to the remote API.

mod link;
mod new;
mod remote;

pub use link::link;
pub use new::new_resource;
pub use remote::{list_containers, list_projects, restart, status, unlink};
