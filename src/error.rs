// ABOUTME: Application-wide error types for tether.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::api::ApiError;
use crate::containers::ContainerError;
use crate::projects::ProjectError;
use crate::scaffold::ScaffoldError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not inside a project directory")]
    NotInProject,

    #[error("configuration file not found in {0}; set TETHER_ENDPOINT or create the file")]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Per-container failures were already rendered in the link report;
    /// this only carries the exit status and a count.
    #[error("{failed} of {total} containers failed to link")]
    LinkFailed { failed: usize, total: usize },

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
}

pub type Result<T> = std::result::Result<T, Error>;
