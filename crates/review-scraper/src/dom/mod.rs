//! The slice of a DOM the extractor needs.
//!
//! Implemented over a live Chromium page and over statically parsed HTML, so
//! the same extraction code runs against a browser and against saved pages.

pub mod chromium;
pub mod static_html;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
    #[error("browser query failed: {0}")]
    Driver(String),
}

impl From<chromiumoxide::error::CdpError> for DomError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        DomError::Driver(err.to_string())
    }
}

/// A handle to one element. Queries only look at the element's descendants.
#[async_trait(?Send)]
pub trait DomNode: Sized {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError>;

    /// First descendant matching `selector`; `Ok(None)` when nothing matches.
    async fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError>;

    /// Lower-case tag name, e.g. `meta`.
    async fn tag_name(&self) -> Result<String, DomError>;

    /// Visible text of the element and its descendants, untrimmed.
    async fn text(&self) -> Result<String, DomError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError>;
}

/// Whole-document queries.
#[async_trait(?Send)]
pub trait DomDocument {
    type Node: DomNode;

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Node>, DomError>;
}

/// A navigable document, i.e. a browser tab.
#[async_trait(?Send)]
pub trait ReviewPage: DomDocument {
    async fn navigate(&self, url: &str) -> Result<(), DomError>;
}
