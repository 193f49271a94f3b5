// ABOUTME: Link report model: per-container outcomes, the composite error, and rendering.
// ABOUTME: Outcome order always matches the caller-supplied container order.

use crate::containers::ContainerError;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// Cause of a failed container deploy.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The batch was cancelled before this deploy was dispatched.
    #[error("cancelled before deploy")]
    Cancelled,
}

/// Result of one container deploy attempt.
#[derive(Debug)]
pub enum DeployOutcome {
    Success(String),
    Failure(String, DeployError),
}

/// One failed container reference with its classified cause.
#[derive(Debug, Error)]
#[error("{container_path}: {error}")]
pub struct LinkError {
    pub container_path: String,

    #[source]
    pub error: DeployError,
}

/// Composite error aggregating every failed container, in input order.
#[derive(Debug, Default)]
pub struct Errors {
    pub list: Vec<LinkError>,
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, failure) in self.list.iter().enumerate() {
            if pos > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Errors {}

/// Report owned by one orchestrator run. Callers only observe it after the
/// run has attempted every requested container.
#[derive(Debug, Default)]
pub struct LinkReport {
    /// Successfully linked container paths, in input order.
    pub success: Vec<String>,

    /// Failed container references, in input order.
    pub errors: Errors,
}

impl LinkReport {
    pub(crate) fn from_outcomes(outcomes: Vec<DeployOutcome>) -> Self {
        let mut report = Self::default();

        for outcome in outcomes {
            match outcome {
                DeployOutcome::Success(path) => report.success.push(path),
                DeployOutcome::Failure(path, error) => report.errors.list.push(LinkError {
                    container_path: path,
                    error,
                }),
            }
        }

        report
    }

    /// Total number of outcomes, one per requested container.
    pub fn len(&self) -> usize {
        self.success.len() + self.errors.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_success(&self) -> bool {
        self.errors.list.is_empty()
    }
}

/// Write the human-readable report to an explicit sink.
pub fn render<W: Write>(report: &LinkReport, out: &mut W) -> io::Result<()> {
    for path in &report.success {
        writeln!(out, "Linked {path}")?;
    }

    for failure in &report.errors.list {
        writeln!(out, "Failed to link {failure}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(path: &str, error: DeployError) -> DeployOutcome {
        DeployOutcome::Failure(path.to_string(), error)
    }

    #[test]
    fn from_outcomes_keeps_input_order() {
        let report = LinkReport::from_outcomes(vec![
            DeployOutcome::Success("a".to_string()),
            failure("b", DeployError::Container(ContainerError::NotFound)),
            DeployOutcome::Success("c".to_string()),
            failure("d", DeployError::Cancelled),
        ]);

        assert_eq!(report.len(), 4);
        assert_eq!(report.success, vec!["a".to_string(), "c".to_string()]);

        let failed: Vec<&str> = report
            .errors
            .list
            .iter()
            .map(|e| e.container_path.as_str())
            .collect();
        assert_eq!(failed, vec!["b", "d"]);
    }

    #[test]
    fn composite_error_formats_one_line_per_failure() {
        let report = LinkReport::from_outcomes(vec![
            failure("foo", DeployError::Container(ContainerError::NotFound)),
            failure("bar", DeployError::Container(ContainerError::InvalidId)),
        ]);

        let rendered = report.errors.to_string();
        assert_eq!(
            rendered,
            "foo: container not found\nbar: invalid container ID"
        );
    }

    #[test]
    fn empty_report_is_success() {
        let report = LinkReport::from_outcomes(Vec::new());

        assert!(report.is_empty());
        assert!(report.is_success());
        assert_eq!(report.errors.to_string(), "");
    }

    #[test]
    fn render_writes_to_the_given_sink() {
        let report = LinkReport::from_outcomes(vec![
            DeployOutcome::Success("web".to_string()),
            failure("auth", DeployError::Container(ContainerError::NotFound)),
        ]);

        let mut sink = Vec::new();
        render(&report, &mut sink).unwrap();

        let rendered = String::from_utf8(sink).unwrap();
        assert!(rendered.contains("Linked web\n"));
        assert!(rendered.contains("Failed to link auth: container not found\n"));
    }
}
