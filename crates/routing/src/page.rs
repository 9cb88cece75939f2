use std::fmt;

use serde::{Serialize, Serializer};

/// Entity families that split into list, detail and create views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityFamily {
    Issues,
    Docs,
    PullRequests,
    Users,
}

impl EntityFamily {
    pub const ALL: [Self; 4] = [Self::Issues, Self::Docs, Self::PullRequests, Self::Users];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Docs => "docs",
            Self::PullRequests => "pull-requests",
            Self::Users => "users",
        }
    }
}

/// A page keyword: the segment right after `org/project` (or the first
/// segment of an aggregate URL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Entity(EntityFamily),
    Assets,
    Config,
}

/// Page a bare `org/project` URL redirects to.
pub const DEFAULT_PAGE: Page = Page::Entity(EntityFamily::Issues);

impl Page {
    pub const ALL: [Self; 6] = [
        Self::Entity(EntityFamily::Issues),
        Self::Entity(EntityFamily::Docs),
        Self::Entity(EntityFamily::PullRequests),
        Self::Entity(EntityFamily::Users),
        Self::Assets,
        Self::Config,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Entity(family) => family.keyword(),
            Self::Assets => "assets",
            Self::Config => "config",
        }
    }

    pub fn family(self) -> Option<EntityFamily> {
        match self {
            Self::Entity(family) => Some(family),
            Self::Assets | Self::Config => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}
