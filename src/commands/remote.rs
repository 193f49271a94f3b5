// ABOUTME: Read-only and lifecycle commands against remote projects and containers.
// ABOUTME: Covers listing, status, restart, and unlink.

use std::env;

use tether::api::{Client, ContainerOps, ProjectOps};
use tether::config::Global;
use tether::context::Context;
use tether::error::{Error, Result};
use tether::projects;

fn client() -> Result<Client> {
    let global = Global::load()?;
    Ok(Client::new(&global)?)
}

pub async fn list_projects() -> Result<()> {
    let client = client()?;
    let projects = client.list_projects().await?;

    for project in &projects {
        println!(
            "{}\t{} {}",
            project.id,
            project.name,
            project.state.as_deref().unwrap_or_default()
        );
    }
    println!("total {}", projects.len());

    Ok(())
}

pub async fn list_containers(project: Option<String>) -> Result<()> {
    let project_id = match project {
        Some(id) => id,
        None => project_from_context()?,
    };

    let client = client()?;
    let list = client.list_containers(&project_id).await?;

    for (id, container) in &list {
        println!(
            "{}\t{}.{} ({}) {}",
            id,
            id,
            project_id,
            container.name,
            container.state.as_deref().unwrap_or_default()
        );
    }
    println!("total {}", list.len());

    Ok(())
}

pub async fn status(project: &str, container: Option<&str>) -> Result<()> {
    let client = client()?;

    let state = match container {
        Some(container_id) => client.container_state(project, container_id).await?,
        None => client.project_state(project).await?,
    };
    println!("{state}");

    Ok(())
}

pub async fn restart(project: &str, container: Option<&str>) -> Result<()> {
    let client = client()?;

    match container {
        Some(container_id) => client.restart_container(project, container_id).await?,
        None => client.restart_project(project).await?,
    }

    Ok(())
}

pub async fn unlink(project: &str, container: Option<&str>) -> Result<()> {
    let client = client()?;

    match container {
        Some(container_id) => client.drop_container(project, container_id).await?,
        None => client.drop_project(project).await?,
    }

    Ok(())
}

fn project_from_context() -> Result<String> {
    let cwd = env::current_dir()?;
    let context = Context::load(&cwd);
    let root = context.project_root.ok_or(Error::NotInProject)?;

    Ok(projects::read(&root)?.id)
}
