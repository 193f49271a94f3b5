// ABOUTME: Working-directory scope detection for CLI commands.
// ABOUTME: Walks up the directory tree looking for project and container manifests.

use crate::{containers, projects};
use std::path::{Path, PathBuf};

/// Resource scope of the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Project,
    Container,
}

#[derive(Debug, Clone)]
pub struct Context {
    pub scope: Scope,
    pub project_root: Option<PathBuf>,
    pub container_root: Option<PathBuf>,
}

impl Context {
    /// Detect the resource scope of `dir` by walking up the directory tree.
    /// The nearest container manifest below a project root marks Container
    /// scope; a project manifest alone marks Project scope.
    pub fn load(dir: &Path) -> Self {
        let mut project_root = None;
        let mut container_root = None;

        for ancestor in dir.ancestors() {
            if project_root.is_none()
                && container_root.is_none()
                && ancestor.join(containers::MANIFEST).is_file()
            {
                container_root = Some(ancestor.to_path_buf());
            }

            if project_root.is_none() && ancestor.join(projects::MANIFEST).is_file() {
                project_root = Some(ancestor.to_path_buf());
            }
        }

        // a container manifest only counts below a project root
        if project_root.is_none() {
            container_root = None;
        }

        let scope = match (&project_root, &container_root) {
            (_, Some(_)) => Scope::Container,
            (Some(_), None) => Scope::Project,
            (None, None) => Scope::Global,
        };

        Self {
            scope,
            project_root,
            container_root,
        }
    }
}
