//! In-memory page doubles shared by the loader and runner tests.

use anyhow::anyhow;
use async_trait::async_trait;
use browser_debug::{PageSnapshot, ScreenshotFormat};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use crate::dom::{DomDocument, DomError, DomNode, ReviewPage};

/// A review container that only answers body lookups, with `body` as its text.
///
/// A detached node fails every query, like a live element removed from the page.
#[derive(Debug, Clone, PartialEq)]
pub struct StubNode {
    pub body: &'static str,
    pub detached: bool,
}

impl StubNode {
    pub fn new(body: &'static str) -> Self {
        Self { body, detached: false }
    }

    pub fn detached() -> Self {
        Self { body: "", detached: true }
    }

    fn check(&self) -> Result<(), DomError> {
        if self.detached {
            return Err(DomError::Driver("Node with given id does not belong to the document".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DomNode for StubNode {
    async fn find_all(&self, _selector: &str) -> Result<Vec<Self>, DomError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError> {
        self.check()?;
        Ok(selector.contains("reviewBody").then(|| self.clone()))
    }

    async fn tag_name(&self) -> Result<String, DomError> {
        self.check()?;
        Ok("li".to_string())
    }

    async fn text(&self) -> Result<String, DomError> {
        self.check()?;
        Ok(self.body.to_string())
    }

    async fn attribute(&self, _name: &str) -> Result<Option<String>, DomError> {
        self.check()?;
        Ok(None)
    }
}

/// Reviews show up on the `ready_after`-th poll; `None` means never.
pub struct StubPage {
    pub ready_after: Option<u32>,
    pub nodes: Vec<StubNode>,
    pub fail_navigation: bool,
    pub fail_screenshot: bool,
    pub polls: AtomicU32,
    pub visited: Mutex<Vec<String>>,
}

impl StubPage {
    pub fn new(ready_after: Option<u32>) -> Self {
        Self {
            ready_after,
            nodes: vec![StubNode::new("first"), StubNode::new("second")],
            fail_navigation: false,
            fail_screenshot: false,
            polls: AtomicU32::new(0),
            visited: Mutex::new(Vec::new()),
        }
    }

    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl DomDocument for StubPage {
    type Node = StubNode;

    async fn find_all(&self, _selector: &str) -> Result<Vec<StubNode>, DomError> {
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.ready_after {
            Some(n) if polls >= n => Ok(self.nodes.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl ReviewPage for StubPage {
    async fn navigate(&self, url: &str) -> Result<(), DomError> {
        if self.fail_navigation {
            return Err(DomError::Driver("net::ERR_NAME_NOT_RESOLVED".to_string()));
        }
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[async_trait]
impl PageSnapshot for StubPage {
    async fn snapshot_html(&self) -> anyhow::Result<String> {
        Ok("<html><body>loading...</body></html>".to_string())
    }

    async fn snapshot_image(&self, _format: ScreenshotFormat) -> anyhow::Result<Vec<u8>> {
        if self.fail_screenshot {
            return Err(anyhow!("Page.captureScreenshot timed out"));
        }
        Ok(b"\x89PNG\r\n".to_vec())
    }
}
