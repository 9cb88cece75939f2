//! The URL literal standing in for "no organization".
//!
//! Only this module compares strings against the sentinel. Link building and
//! location parsing go through [`encode_org`] and [`decode_org`]; everything
//! past the URL boundary uses `Option<String>` with `None` for ungrouped.

use crate::page::Page;

/// Segment used in place of an organization slug for ungrouped projects.
pub(crate) const UNGROUPED_SEGMENT: &str = "_";

/// First segment of absolute-path bookmark URLs (`/by-path/srv/widget`).
pub(crate) const BOOKMARK_SEGMENT: &str = "by-path";

pub(crate) fn is_ungrouped_segment(segment: &str) -> bool {
    segment == UNGROUPED_SEGMENT
}

pub(crate) fn encode_org(org: Option<&str>) -> &str {
    org.unwrap_or(UNGROUPED_SEGMENT)
}

pub(crate) fn decode_org(segment: &str) -> Option<String> {
    if is_ungrouped_segment(segment) {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Slugs that cannot lead a project URL: the sentinel, the bookmark prefix,
/// and page keywords (which would parse as aggregate pages).
pub(crate) fn is_reserved_org(slug: &str) -> bool {
    is_ungrouped_segment(slug) || slug == BOOKMARK_SEGMENT || Page::from_keyword(slug).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("organization slug must not be empty")]
    Empty,
    #[error("organization slug `{0}` is reserved")]
    Reserved(String),
    #[error("organization slug `{0}` must not contain `/`")]
    Separator(String),
}

/// Check that an organization slug can appear as the first URL segment.
///
/// Rejects the ungrouped sentinel, page keywords (which mark aggregate URLs)
/// and the bookmark prefix. Resolution applies the same rule to slugs coming
/// from the directory.
pub fn validate_org_slug(slug: &str) -> Result<(), SlugError> {
    if slug.trim().is_empty() {
        return Err(SlugError::Empty);
    }
    if slug.contains('/') {
        return Err(SlugError::Separator(slug.to_string()));
    }
    if is_reserved_org(slug) {
        return Err(SlugError::Reserved(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_ungrouped() {
        assert_eq!(encode_org(None), UNGROUPED_SEGMENT);
        assert_eq!(decode_org(UNGROUPED_SEGMENT), None);
    }

    #[test]
    fn encode_decode_organization() {
        assert_eq!(encode_org(Some("acme")), "acme");
        assert_eq!(decode_org("acme").as_deref(), Some("acme"));
    }

    #[test]
    fn validate_accepts_plain_slugs() {
        assert_eq!(validate_org_slug("acme"), Ok(()));
        assert_eq!(validate_org_slug("acme-labs"), Ok(()));
    }

    #[test]
    fn validate_rejects_reserved() {
        for slug in [UNGROUPED_SEGMENT, "by-path", "issues", "config"] {
            assert_eq!(
                validate_org_slug(slug),
                Err(SlugError::Reserved(slug.to_string()))
            );
        }
        assert_eq!(validate_org_slug(" "), Err(SlugError::Empty));
        assert!(matches!(
            validate_org_slug("a/b"),
            Err(SlugError::Separator(_))
        ));
    }

    #[test]
    fn reserved_orgs_cover_every_page_keyword() {
        for page in Page::ALL {
            assert!(is_reserved_org(page.keyword()), "{page}");
        }
        assert!(is_reserved_org(BOOKMARK_SEGMENT));
        assert!(is_reserved_org(UNGROUPED_SEGMENT));
        assert!(!is_reserved_org("acme"));
        assert!(!is_reserved_org("documents"));
    }
}
