// ABOUTME: Link orchestration using the type state pattern.
// ABOUTME: Resolves the project once, then fans out container deploys into an ordered report.

mod report;

pub use report::{DeployError, DeployOutcome, Errors, LinkError, LinkReport, render};

use crate::api::{ContainerOps, ProjectOps};
use crate::containers;
use crate::projects::{self, Project, ProjectError};
use futures::StreamExt;
use futures::stream;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Cooperative cancellation flag shared with a surrounding caller.
///
/// Deploys already dispatched finish or fail on their own; paths not yet
/// dispatched are recorded as cancelled outcomes instead of being dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for the deploy fan-out.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Upper bound on in-flight deploys. Zero and one both mean strictly
    /// sequential.
    pub concurrency: usize,

    pub cancel: CancelToken,
}

/// Machine not yet bound to a project.
#[derive(Debug, Default)]
pub struct Uninitialized;

/// Project manifest read and resolved remotely.
#[derive(Debug)]
pub struct Resolved {
    project: Project,
    project_dir: PathBuf,
}

/// Every requested container has been attempted.
#[derive(Debug)]
pub struct Completed {
    project: Project,
    report: LinkReport,
}

/// Link orchestrator; `S` tracks the setup/run lifecycle at compile time,
/// so `run` is only reachable once the project has been resolved.
#[derive(Debug)]
pub struct Linker<A, S> {
    api: A,
    state: S,
}

impl<A> Linker<A, Uninitialized> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Uninitialized,
        }
    }
}

impl<A: ProjectOps + ContainerOps> Linker<A, Uninitialized> {
    /// Read the project manifest and resolve the project remotely, exactly
    /// once per machine. An ID that already exists resolves as success; a
    /// freshly created project gets its auth descriptor applied.
    ///
    /// # Errors
    ///
    /// Any manifest or resolution error is fatal: the machine stays
    /// unusable and no container deploy is attempted.
    pub async fn setup(
        self,
        project_dir: impl AsRef<Path>,
    ) -> Result<Linker<A, Resolved>, ProjectError> {
        let project_dir = project_dir.as_ref().to_path_buf();
        let project = projects::read(&project_dir)?;

        let created = projects::validate_or_create(&self.api, &project).await?;

        if created && let Some(auth) = &project.auth {
            self.api.apply_project_auth(&project.id, auth).await?;
        }

        debug!(project = %project.id, created, "project resolved");

        Ok(Linker {
            api: self.api,
            state: Resolved {
                project,
                project_dir,
            },
        })
    }
}

impl<A: ProjectOps + ContainerOps> Linker<A, Resolved> {
    /// Sequentially attempt every requested container. See [`Self::run_with`].
    pub async fn run(self, container_paths: &[String]) -> Linker<A, Completed> {
        self.run_with(container_paths, RunOptions::default()).await
    }

    /// Attempt every requested container, never aborting the batch on a
    /// single failure. Each path yields exactly one outcome, and outcomes
    /// keep the caller-supplied order regardless of completion order.
    pub async fn run_with(
        self,
        container_paths: &[String],
        options: RunOptions,
    ) -> Linker<A, Completed> {
        let Linker { api, state } = self;
        let Resolved {
            project,
            project_dir,
        } = state;

        let outcomes: Vec<DeployOutcome> = {
            let api = &api;
            let project = &project;
            let project_dir = project_dir.as_path();
            let cancel = &options.cancel;

            stream::iter(container_paths.iter().cloned())
                .map(|path| async move {
                    if cancel.is_cancelled() {
                        return DeployOutcome::Failure(path, DeployError::Cancelled);
                    }

                    match deploy_one(api, project, project_dir, &path).await {
                        Ok(()) => {
                            info!(container = %path, project = %project.id, "container linked");
                            DeployOutcome::Success(path)
                        }
                        Err(err) => DeployOutcome::Failure(path, err),
                    }
                })
                .buffered(options.concurrency.max(1))
                .collect()
                .await
        };

        Linker {
            api,
            state: Completed {
                project,
                report: LinkReport::from_outcomes(outcomes),
            },
        }
    }
}

impl<A> Linker<A, Completed> {
    pub fn project(&self) -> &Project {
        &self.state.project
    }

    pub fn report(&self) -> &LinkReport {
        &self.state.report
    }

    /// Container paths linked successfully, in input order.
    pub fn success(&self) -> &[String] {
        &self.state.report.success
    }

    /// Failed container references, in input order.
    pub fn errors(&self) -> &Errors {
        &self.state.report.errors
    }

    /// Overall result of the batch: the report on full success, the
    /// composite error listing every failure otherwise.
    pub fn finish(self) -> Result<LinkReport, Errors> {
        if self.state.report.is_success() {
            Ok(self.state.report)
        } else {
            Err(self.state.report.errors)
        }
    }
}

async fn deploy_one<A: ContainerOps>(
    api: &A,
    project: &Project,
    project_dir: &Path,
    path: &str,
) -> Result<(), DeployError> {
    let container = containers::read(project_dir.join(path))?;
    containers::deploy(api, &project.id, path, &container).await?;
    Ok(())
}
