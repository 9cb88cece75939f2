//! CLI commands that navigate, build links, or touch the last-project pointer.

use {
    anyhow::bail,
    waypoint_context::{Navigation, PathState, forget_last_project},
    waypoint_routing::{Page, View, build_project_sub_link, validate_org_slug},
};

use crate::services::Services;

pub async fn open(services: &Services, url: &str, json: bool) -> anyhow::Result<()> {
    let navigation = services.navigator.navigate(url).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&navigation)?);
    } else {
        print!("{}", render_navigation(&navigation));
    }
    Ok(())
}

pub fn link(
    org: Option<&str>,
    project: &str,
    page: &str,
    subpath: &[String],
) -> anyhow::Result<()> {
    if let Some(org) = org {
        validate_org_slug(org)?;
    }
    if project.is_empty() {
        bail!("project name must not be empty");
    }
    if Page::from_keyword(page).is_none() {
        let known: Vec<_> = Page::ALL.iter().map(|p| p.keyword()).collect();
        bail!("unknown page `{page}` (expected one of: {})", known.join(", "));
    }
    println!("{}", project_sub_link(org, project, page, subpath));
    Ok(())
}

fn project_sub_link(org: Option<&str>, project: &str, page: &str, subpath: &[String]) -> String {
    let subpath: Vec<&str> = subpath.iter().map(String::as_str).collect();
    build_project_sub_link(org, project, page, &subpath)
}

pub async fn forget(services: &Services) -> anyhow::Result<()> {
    forget_last_project(services.store.as_ref()).await?;
    println!("Forgot last project.");
    Ok(())
}

fn render_navigation(navigation: &Navigation) -> String {
    let mut out = String::new();
    match &navigation.redirected_from {
        Some(from) => out.push_str(&format!("url:     {} (from {from})\n", navigation.url)),
        None => out.push_str(&format!("url:     {}\n", navigation.url)),
    }
    out.push_str(&format!("view:    {}\n", describe_view(&navigation.view)));
    match &navigation.state {
        PathState::Resolved { resolution } => {
            out.push_str(&format!(
                "project: {} ({})\n",
                resolution.project_ref(),
                resolution.display_path
            ));
            if !resolution.initialized {
                out.push_str("         not initialized\n");
            }
        },
        PathState::Aggregate => out.push_str("project: none\n"),
        PathState::Loading { project }
        | PathState::NotFound { project, .. }
        | PathState::Unavailable { project, .. } => {
            out.push_str(&format!("project: {project} (unresolved)\n"));
        },
    }
    out
}

fn describe_view(view: &View) -> String {
    match view {
        View::ProjectChooser => "project chooser".into(),
        View::List { family } => format!("{} list", family.keyword()),
        View::Detail { family, id } => format!("{} detail {id}", family.keyword()),
        View::Create { family } => format!("new {}", family.keyword()),
        View::Single { page } => page.keyword().into(),
        View::NotFound { keyword } => format!("not found: unknown page `{keyword}`"),
        View::ProjectNotFound { message } => message.clone(),
        View::DirectoryUnavailable { message } => message.clone(),
    }
}
