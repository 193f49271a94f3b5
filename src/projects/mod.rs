// ABOUTME: Project manifest model and remote project operations.
// ABOUTME: Covers reading project.json and the idempotent validate-or-create resolution.

use crate::api::{ApiError, ProjectOps, reason};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const MANIFEST: &str = "project.json";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project not found")]
    NotFound,

    #[error("invalid project ID")]
    InvalidId,

    #[error("project already exists")]
    AlreadyExists,

    #[error("malformed project manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Project descriptor, read from a local manifest or listed remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<ProjectAuth>,
}

/// Access descriptor applied to a project after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Read a project directory's properties, defined by a project.json on it.
pub fn read(path: impl AsRef<Path>) -> Result<Project, ProjectError> {
    let manifest = path.as_ref().join(MANIFEST);

    let content = fs::read_to_string(&manifest).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ProjectError::NotFound,
        _ => ProjectError::Io(err),
    })?;

    let project: Project = serde_json::from_str(&content)?;

    if project.id.is_empty() {
        return Err(ProjectError::InvalidId);
    }

    Ok(project)
}

/// Check a project ID against the remote validator, classifying the named
/// fault reasons into the project error taxonomy.
pub async fn validate<A: ProjectOps + ?Sized>(api: &A, id: &str) -> Result<(), ProjectError> {
    match api.validate_project_id(id).await {
        Ok(()) => Ok(()),
        Err(err) if err.has_reason(reason::PROJECT_ALREADY_EXISTS) => {
            Err(ProjectError::AlreadyExists)
        }
        Err(err) if err.has_reason(reason::INVALID_PROJECT_ID) => Err(ProjectError::InvalidId),
        Err(err) => Err(ProjectError::Api(err)),
    }
}

/// Ensure the project exists remotely, creating it when the validator reports
/// the ID as valid and unused. An ID that already exists resolves as success.
/// Returns whether a creation call was made.
pub async fn validate_or_create<A: ProjectOps + ?Sized>(
    api: &A,
    project: &Project,
) -> Result<bool, ProjectError> {
    match validate(api, &project.id).await {
        Ok(()) => {
            api.create_project(project).await?;
            debug!(project = %project.id, "project created");
            Ok(true)
        }
        Err(ProjectError::AlreadyExists) => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_parses_manifest() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join(MANIFEST),
            r#"{"id": "images", "name": "Image Server"}"#,
        )
        .unwrap();

        let project = read(tmp.path()).unwrap();
        assert_eq!(project.id, "images");
        assert_eq!(project.name, "Image Server");
        assert!(project.auth.is_none());
    }

    #[test]
    fn read_parses_auth_descriptor() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join(MANIFEST),
            r#"{"id": "images", "auth": {"token": "secret"}}"#,
        )
        .unwrap();

        let project = read(tmp.path()).unwrap();
        assert_eq!(
            project.auth.unwrap().token.as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn read_missing_manifest_is_not_found() {
        let tmp = tempdir().unwrap();

        assert!(matches!(
            read(tmp.path().join("unknown")),
            Err(ProjectError::NotFound)
        ));
    }

    #[test]
    fn read_missing_id_is_invalid() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join(MANIFEST), r#"{"name": "no id"}"#).unwrap();

        assert!(matches!(read(tmp.path()), Err(ProjectError::InvalidId)));
    }

    #[test]
    fn read_corrupted_manifest_is_parse_error() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join(MANIFEST), "{ corrupted").unwrap();

        assert!(matches!(read(tmp.path()), Err(ProjectError::Parse(_))));
    }
}
