// ABOUTME: Container manifest model and remote container operations.
// ABOUTME: Covers reading container.json, the deploy/link call, listing, and ID validation.

use crate::api::{ApiError, ContainerOps, reason};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const MANIFEST: &str = "container.json";

/// Containers of a project, keyed by container ID.
pub type Containers = BTreeMap<String, Container>;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container not found")]
    NotFound,

    #[error("invalid container ID")]
    InvalidId,

    #[error("container already exists")]
    AlreadyExists,

    #[error("malformed container manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Container descriptor, read from a local manifest or listed remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Hooks>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deploy_ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
}

/// Lifecycle hook commands carried by a container manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hooks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// Registry entry describing a container template.
#[derive(Debug, Clone, Deserialize)]
pub struct Register {
    #[serde(default)]
    pub category: String,

    #[serde(rename = "containerDefault")]
    pub container_default: RegisterContainer,

    #[serde(default)]
    pub description: String,
}

/// Template defaults of a registry entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterContainer {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub container_type: Option<String>,

    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Read a container directory's properties, defined by a container.json on it.
pub fn read(path: impl AsRef<Path>) -> Result<Container, ContainerError> {
    let manifest = path.as_ref().join(MANIFEST);

    let content = fs::read_to_string(&manifest).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ContainerError::NotFound,
        _ => ContainerError::Io(err),
    })?;

    let container: Container = serde_json::from_str(&content)?;

    if container.id.is_empty() {
        return Err(ContainerError::InvalidId);
    }

    Ok(container)
}

/// Names of the immediate subdirectories of `root` holding a valid container
/// manifest, sorted. A malformed manifest aborts the listing; a directory
/// without one is skipped.
pub fn list_from_directory(root: impl AsRef<Path>) -> Result<Vec<String>, ContainerError> {
    let mut list = Vec::new();

    for entry in fs::read_dir(root.as_ref()).map_err(ContainerError::Io)? {
        let entry = entry.map_err(ContainerError::Io)?;

        if !entry.file_type().map_err(ContainerError::Io)?.is_dir() {
            continue;
        }

        match read(entry.path()) {
            Ok(_) => list.push(entry.file_name().to_string_lossy().into_owned()),
            Err(ContainerError::NotFound) => continue,
            Err(err) => return Err(err),
        }
    }

    list.sort();
    Ok(list)
}

/// Link a container manifest to a project on the remote platform.
///
/// Deploy-time faults are surfaced unmodified; only manifest reads are
/// classified by this module.
pub async fn deploy<A: ContainerOps + ?Sized>(
    api: &A,
    project_id: &str,
    source: &str,
    container: &Container,
) -> Result<(), ContainerError> {
    debug!(project = project_id, source, "linking container from manifest");

    api.deploy_container(project_id, source, container).await?;
    Ok(())
}

/// Check a container ID against the remote validator, classifying the named
/// fault reasons into the container error taxonomy.
pub async fn validate<A: ContainerOps + ?Sized>(
    api: &A,
    project_id: &str,
    container_id: &str,
) -> Result<(), ContainerError> {
    match api.validate_container_id(project_id, container_id).await {
        Ok(()) => Ok(()),
        Err(err) if err.has_reason(reason::INVALID_CONTAINER_ID) => Err(ContainerError::InvalidId),
        Err(err) if err.has_reason(reason::CONTAINER_ALREADY_EXISTS) => {
            Err(ContainerError::AlreadyExists)
        }
        Err(err) => Err(ContainerError::Api(err)),
    }
}
