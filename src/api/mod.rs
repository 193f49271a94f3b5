// ABOUTME: Remote API surface: fault model, trait seams, and the reqwest-backed client.
// ABOUTME: All non-2xx responses are classified into structured faults with method + URL context.

mod client;
mod fault;
mod traits;

pub use client::Client;
pub use fault::{ApiFault, FaultDetail, reason};
pub use traits::{ContainerOps, ProjectOps};

use thiserror::Error;

/// Errors produced by remote API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status; the fault carries the
    /// decoded body (or a synthesized stand-in) plus method and URL.
    #[error(transparent)]
    Fault(#[from] ApiFault),

    /// A successful response was expected to carry JSON but did not.
    #[error("expected an application/json response, got {content_type:?} ({method} {url})")]
    UnexpectedContentType {
        method: String,
        url: String,
        content_type: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The structured fault, when the server produced one.
    pub fn fault(&self) -> Option<&ApiFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Whether this error is a fault carrying the given reason code.
    pub fn has_reason(&self, reason: &str) -> bool {
        self.fault().is_some_and(|fault| fault.has(reason))
    }
}
