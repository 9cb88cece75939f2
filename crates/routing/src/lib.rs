//! Translate between canonical project URLs and the daemon's absolute paths.
//!
//! URL shape: `/{org-or-sentinel}/{project}/{page}[/{segment}...]`.
//!
//! Dispatch table (first match wins), per entity family:
//! 1. No trailing segment: list view
//! 2. `new`: create view
//! 3. Any other segment: detail view for that identifier
//! 4. No page keyword (`org/project`): redirect to the default page
//! 5. `assets` / `config`: single dedicated view
//! 6. Unknown keyword: not-found view

pub mod dispatch;
pub mod error;
pub mod links;
pub mod location;
pub mod page;
pub mod resolve;
pub mod sentinel;

pub use {
    dispatch::{Dispatch, Route, View, dispatch},
    error::{Error, ProjectLookup, Result},
    links::{
        build_bookmark_link, build_contextual_link, build_project_link, build_project_sub_link,
    },
    location::{Location, ProjectRef, parse_location},
    page::{DEFAULT_PAGE, EntityFamily, Page},
    resolve::{ProjectResolution, ProjectResolver},
    sentinel::{SlugError, validate_org_slug},
};
