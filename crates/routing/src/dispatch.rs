use serde::Serialize;

use crate::{
    location::ProjectRef,
    page::{DEFAULT_PAGE, EntityFamily, Page},
};

/// Segment selecting the create variant of an entity family.
const CREATE_SEGMENT: &str = "new";

/// What the dispatcher reads from a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    /// `None` for aggregate URLs.
    pub project: Option<&'a ProjectRef>,
    pub page: Option<&'a str>,
    /// Segments after the page keyword.
    pub rest: &'a [String],
}

/// Every view the router can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    /// Landing page shown when no project can be picked automatically.
    ProjectChooser,
    List {
        family: EntityFamily,
    },
    Detail {
        family: EntityFamily,
        id: String,
    },
    Create {
        family: EntityFamily,
    },
    /// Pages without a list/detail split (`assets`, `config`).
    Single {
        page: Page,
    },
    /// Unknown page keyword.
    NotFound {
        keyword: String,
    },
    /// The directory answered but no project matched.
    ProjectNotFound {
        message: String,
    },
    /// The directory could not be reached.
    DirectoryUnavailable {
        message: String,
    },
}

/// Dispatcher result. A redirect target is a fresh URL to parse, never a
/// view to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Dispatch {
    Render { view: View },
    Redirect { to: String },
}

impl Dispatch {
    fn render(view: View) -> Self {
        Self::Render { view }
    }
}

/// The single routing decision table shared by every entry point.
pub fn dispatch(route: &Route<'_>) -> Dispatch {
    let Some(keyword) = route.page else {
        return match route.project {
            Some(project) => Dispatch::Redirect {
                to: project.link(DEFAULT_PAGE.keyword()),
            },
            None => Dispatch::render(View::ProjectChooser),
        };
    };

    match Page::from_keyword(keyword) {
        Some(Page::Entity(family)) => Dispatch::render(entity_view(family, route.rest)),
        Some(page) => Dispatch::render(View::Single { page }),
        None => Dispatch::render(View::NotFound {
            keyword: keyword.to_string(),
        }),
    }
}

fn entity_view(family: EntityFamily, rest: &[String]) -> View {
    match rest.first().map(String::as_str) {
        None | Some("") => View::List { family },
        Some(CREATE_SEGMENT) => View::Create { family },
        Some(id) => View::Detail {
            family,
            id: id.to_string(),
        },
    }
}
