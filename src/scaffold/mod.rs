// ABOUTME: Interactive scaffolding for new project and container manifests.
// ABOUTME: Container templates come from the remote registry; menu selection is strictly bounded.

use crate::api::{ApiError, ContainerOps};
use crate::containers::{Container, Register};
use crate::context::Context;
use crate::projects::Project;
use dialoguer::Input;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("a container's immediate parent dir must be the root of a project")]
    ContainerPath,

    #[error("a project can not have another project as its parent")]
    ProjectPath,

    #[error("value for resource ID is invalid")]
    InvalidId,

    #[error("a resource already exists on the root of this location")]
    ResourceExists,

    #[error("invalid option")]
    InvalidOption,

    #[error("the registry has no container templates")]
    EmptyRegistry,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("malformed manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Scaffold a container manifest in `dir`, which must sit exactly one level
/// below the project root. The template is picked from the remote registry.
pub async fn new_container<A: ContainerOps + ?Sized>(
    api: &A,
    context: &Context,
    dir: &Path,
) -> Result<(), ScaffoldError> {
    let project_root = context
        .project_root
        .as_deref()
        .ok_or(ScaffoldError::ContainerPath)?;

    let rel = dir
        .strip_prefix(project_root)
        .map_err(|_| ScaffoldError::ContainerPath)?;

    if rel.as_os_str().is_empty() {
        return Err(ScaffoldError::ResourceExists);
    }

    // only allow container creation at first subdir level
    if rel.components().count() != 1 {
        return Err(ScaffoldError::ContainerPath);
    }

    let registry = api.container_registry().await?;
    if registry.is_empty() {
        return Err(ScaffoldError::EmptyRegistry);
    }

    println!("Please choose an option to create a container");
    for (pos, entry) in registry.iter().enumerate() {
        println!("{}) {}", pos + 1, entry.container_default.name);
    }

    let option: String = Input::new()
        .with_prompt(format!("Select from 1..{}", registry.len()))
        .interact_text()?;

    let index = parse_menu_choice(&option, registry.len()).ok_or(ScaffoldError::InvalidOption)?;
    let entry = &registry[index];

    let id = prompt_with_default("ID", &entry.container_default.id)?;
    let name = prompt_with_default("Name", &entry.container_default.name)?;

    let container = container_from_register(entry, id, name);
    write_manifest(&dir.join(crate::containers::MANIFEST), &container)
}

/// Scaffold a project manifest in `dir`. Refused inside an existing project.
pub fn new_project(context: &Context, dir: &Path) -> Result<(), ScaffoldError> {
    if context.project_root.is_some() {
        return Err(ScaffoldError::ProjectPath);
    }

    println!("Creating project");

    let id: String = Input::new()
        .with_prompt("ID")
        .allow_empty(true)
        .interact_text()?;

    if id.is_empty() {
        return Err(ScaffoldError::InvalidId);
    }

    let name: String = Input::new()
        .with_prompt("Name")
        .allow_empty(true)
        .interact_text()?;

    let project = Project {
        id,
        name,
        ..Project::default()
    };

    write_manifest(&dir.join(crate::projects::MANIFEST), &project)
}

/// Map a 1-based menu answer to a registry index, rejecting anything outside
/// `1..=len`.
pub fn parse_menu_choice(input: &str, len: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    let index = choice.checked_sub(1)?;

    if index < len { Some(index) } else { None }
}

/// Build a container manifest from a registry template and the chosen
/// identity, copying the template's type and environment.
pub fn container_from_register(entry: &Register, id: String, name: String) -> Container {
    Container {
        id,
        name,
        container_type: entry.container_default.container_type.clone(),
        env: entry.container_default.env.clone(),
        ..Container::default()
    }
}

fn prompt_with_default(label: &str, default: &str) -> Result<String, ScaffoldError> {
    let value: String = Input::new()
        .with_prompt(format!("{label} [default: {default}]"))
        .allow_empty(true)
        .interact_text()?;

    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}

fn write_manifest<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ScaffoldError> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body + "\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::RegisterContainer;
    use std::collections::HashMap;

    #[test]
    fn menu_choice_is_one_based() {
        assert_eq!(parse_menu_choice("1", 3), Some(0));
        assert_eq!(parse_menu_choice("3", 3), Some(2));
        assert_eq!(parse_menu_choice(" 2 ", 3), Some(1));
    }

    #[test]
    fn menu_choice_rejects_out_of_range() {
        assert_eq!(parse_menu_choice("0", 3), None);
        assert_eq!(parse_menu_choice("4", 3), None);
        // index == len must not slip through
        assert_eq!(parse_menu_choice("4", 4), Some(3));
        assert_eq!(parse_menu_choice("5", 4), None);
        assert_eq!(parse_menu_choice("1", 0), None);
    }

    #[test]
    fn menu_choice_rejects_garbage() {
        assert_eq!(parse_menu_choice("", 3), None);
        assert_eq!(parse_menu_choice("abc", 3), None);
        assert_eq!(parse_menu_choice("-1", 3), None);
        assert_eq!(parse_menu_choice("1.5", 3), None);
    }

    #[test]
    fn container_from_register_copies_template_defaults() {
        let mut env = HashMap::new();
        env.insert("RUNTIME".to_string(), "node".to_string());

        let entry = Register {
            category: "runtime".to_string(),
            description: "Node.js container".to_string(),
            container_default: RegisterContainer {
                id: "nodejs".to_string(),
                name: "Node.js".to_string(),
                container_type: Some("nodejs:latest".to_string()),
                env,
            },
        };

        let container =
            container_from_register(&entry, "api".to_string(), "API backend".to_string());

        assert_eq!(container.id, "api");
        assert_eq!(container.name, "API backend");
        assert_eq!(container.container_type.as_deref(), Some("nodejs:latest"));
        assert_eq!(
            container.env.get("RUNTIME").map(String::as_str),
            Some("node")
        );
        assert!(container.hooks.is_none());
    }
}
