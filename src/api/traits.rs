// ABOUTME: Trait seams over the remote API, split by resource kind.
// ABOUTME: Commands and the link orchestrator depend on these, never on the concrete client.

use super::ApiError;
use crate::containers::{Container, Containers, Register};
use crate::projects::{Project, ProjectAuth};
use async_trait::async_trait;

/// Remote operations on projects.
#[async_trait]
pub trait ProjectOps: Send + Sync {
    /// Check a project ID against the remote validator. The check is
    /// read-only; a fault carries the rejection reason.
    async fn validate_project_id(&self, id: &str) -> Result<(), ApiError>;

    /// Create a project from its manifest.
    async fn create_project(&self, project: &Project) -> Result<(), ApiError>;

    /// Apply an auth descriptor to an existing project.
    async fn apply_project_auth(
        &self,
        project_id: &str,
        auth: &ProjectAuth,
    ) -> Result<(), ApiError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn project_state(&self, project_id: &str) -> Result<String, ApiError>;

    async fn restart_project(&self, project_id: &str) -> Result<(), ApiError>;

    /// Unlink a project and everything deployed to it.
    async fn drop_project(&self, project_id: &str) -> Result<(), ApiError>;
}

/// Remote operations on containers.
#[async_trait]
pub trait ContainerOps: Send + Sync {
    /// Upload a container manifest and its source path, linking the
    /// container to the given project.
    async fn deploy_container(
        &self,
        project_id: &str,
        source: &str,
        container: &Container,
    ) -> Result<(), ApiError>;

    /// Check a container ID against the remote validator.
    async fn validate_container_id(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<(), ApiError>;

    async fn list_containers(&self, project_id: &str) -> Result<Containers, ApiError>;

    async fn container_state(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<String, ApiError>;

    async fn restart_container(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<(), ApiError>;

    /// Unlink a container from its project.
    async fn drop_container(&self, project_id: &str, container_id: &str) -> Result<(), ApiError>;

    /// Container templates available for scaffolding.
    async fn container_registry(&self) -> Result<Vec<Register>, ApiError>;
}
