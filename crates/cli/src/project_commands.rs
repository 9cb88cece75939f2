//! CLI commands that query the project directory.

use std::path::Path;

use {
    anyhow::Context,
    waypoint_directory::{ProjectFilter, ProjectInfo},
    waypoint_routing::{DEFAULT_PAGE, ProjectRef},
};

use crate::services::Services;

pub async fn resolve(services: &Services, path: &Path, json: bool) -> anyhow::Result<()> {
    let resolution = services
        .resolver
        .resolve_by_path(path)
        .await
        .with_context(|| format!("no project at {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.link(DEFAULT_PAGE.keyword()));
    }
    Ok(())
}

pub async fn list(services: &Services, filter: &ProjectFilter, json: bool) -> anyhow::Result<()> {
    let mut projects = services
        .resolver
        .directory()
        .list_projects(filter)
        .await
        .context("failed to list projects")?;
    projects.sort_by(|a, b| {
        (a.organization_slug.as_deref(), a.name.as_str())
            .cmp(&(b.organization_slug.as_deref(), b.name.as_str()))
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if projects.is_empty() {
        println!("No projects found.");
    } else {
        for project in &projects {
            println!("{}", format_row(project));
        }
    }
    Ok(())
}

fn format_row(project: &ProjectInfo) -> String {
    let project_ref = ProjectRef::new(project.organization_slug.as_deref(), project.name.as_str());
    let mut flags = Vec::new();
    if project.favorite {
        flags.push("favorite");
    }
    if !project.initialized {
        flags.push("uninitialized");
    }
    if project.stale {
        flags.push("stale");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    format!("  {project_ref}  {path}{flags}", path = project.display_path)
}
