// ABOUTME: Structured fault sent by the remote API when errors happen.
// ABOUTME: Method and URL are diagnostic context and are never part of the wire body.

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;

/// Machine-readable reason codes the client classifies on.
pub mod reason {
    pub const PROJECT_ALREADY_EXISTS: &str = "projectAlreadyExists";
    pub const INVALID_PROJECT_ID: &str = "invalidProjectId";
    pub const CONTAINER_ALREADY_EXISTS: &str = "containerAlreadyExists";
    pub const INVALID_CONTAINER_ID: &str = "invalidContainerId";
}

/// Fault document returned on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiFault {
    #[serde(skip)]
    pub method: String,

    #[serde(skip)]
    pub url: String,

    pub code: u16,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub errors: Vec<FaultDetail>,
}

/// One (reason, message) pair of a fault.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaultDetail {
    pub reason: String,

    #[serde(default)]
    pub message: String,
}

impl ApiFault {
    /// Message for a given reason, if the fault carries it.
    pub fn get(&self, reason: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|detail| detail.reason == reason)
            .map(|detail| detail.message.as_str())
    }

    /// Whether the fault carries the given reason.
    pub fn has(&self, reason: &str) -> bool {
        self.get(reason).is_some()
    }
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote API error:")?;

        if self.code != 0 {
            write!(f, " {}", self.code)?;
        }

        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }

        if !self.method.is_empty() || !self.url.is_empty() {
            write!(f, " ({} {})", self.method, self.url)?;
        }

        for detail in &self.errors {
            write!(f, "\n\t{}: {}", detail.message, detail.reason)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiFault {}

/// Classify a non-2xx response into a fault.
///
/// JSON bodies decode into the fault document; anything else synthesizes a
/// fault from the status line, keeping the raw body as a single detail so
/// nothing the server said is lost.
pub(crate) fn classify(
    method: &str,
    url: &str,
    status: StatusCode,
    content_type: &str,
    body: &str,
) -> ApiFault {
    if content_type.contains("application/json")
        && let Ok(mut fault) = serde_json::from_str::<ApiFault>(body)
    {
        fault.method = method.to_string();
        fault.url = url.to_string();
        return fault;
    }

    ApiFault {
        method: method.to_string(),
        url: url.to_string(),
        code: status.as_u16(),
        message: status.canonical_reason().unwrap_or_default().to_string(),
        errors: vec![FaultDetail {
            reason: body.to_string(),
            message: "body".to_string(),
        }],
    }
}
