// ABOUTME: Link command: resolve the project once, deploy each container, report.
// ABOUTME: Failures are rendered once; the exit status carries only a summary error.

use std::env;
use std::io;

use tether::api::Client;
use tether::config::Global;
use tether::containers;
use tether::context::Context;
use tether::error::{Error, Result};
use tether::link::{CancelToken, Linker, RunOptions, render};
use tracing::debug;

pub async fn link(container_paths: Vec<String>, jobs: usize) -> Result<()> {
    let cwd = env::current_dir()?;
    let context = Context::load(&cwd);
    let project_dir = context.project_root.clone().ok_or(Error::NotInProject)?;

    let global = Global::load()?;
    let client = Client::new(&global)?;

    let container_paths = if container_paths.is_empty() {
        containers::list_from_directory(&project_dir)?
    } else {
        container_paths
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let total = container_paths.len();

    let machine = Linker::new(client).setup(&project_dir).await?;
    let done = machine
        .run_with(
            &container_paths,
            RunOptions {
                concurrency: jobs,
                cancel,
            },
        )
        .await;

    debug!(project = %done.project().id, total, "link finished");
    render(done.report(), &mut io::stdout())?;

    match done.finish() {
        Ok(_) => Ok(()),
        Err(errors) => Err(Error::LinkFailed {
            failed: errors.list.len(),
            total,
        }),
    }
}
