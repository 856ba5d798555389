use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use super::{DomDocument, DomError, DomNode};

/// A parsed HTML document, e.g. a page source saved by the diagnostics capture.
pub struct StaticDocument {
    html: Html,
}

impl StaticDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn page(&self) -> StaticPage<'_> {
        StaticPage { html: &self.html }
    }
}

/// Borrowed view used for whole-document queries.
#[derive(Clone, Copy)]
pub struct StaticPage<'a> {
    html: &'a Html,
}

#[derive(Clone, Copy, Debug)]
pub struct StaticNode<'a> {
    element: ElementRef<'a>,
}

fn parse_selector(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|_| DomError::InvalidSelector(selector.to_string()))
}

/// Text content with whitespace runs collapsed, roughly what `innerText` gives.
fn collapsed_text(element: &ElementRef<'_>) -> String {
    let mut buf = String::new();
    let mut last_space = false;
    for ch in element.text().flat_map(str::chars) {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    if buf.ends_with(' ') {
        buf.pop();
    }
    buf
}

#[async_trait(?Send)]
impl<'a> DomNode for StaticNode<'a> {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .element
            .select(&selector)
            .map(|element| StaticNode { element })
            .collect())
    }

    async fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .element
            .select(&selector)
            .next()
            .map(|element| StaticNode { element }))
    }

    async fn tag_name(&self) -> Result<String, DomError> {
        Ok(self.element.value().name().to_lowercase())
    }

    async fn text(&self) -> Result<String, DomError> {
        Ok(collapsed_text(&self.element))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element.value().attr(name).map(str::to_string))
    }
}

#[async_trait(?Send)]
impl<'a> DomDocument for StaticPage<'a> {
    type Node = StaticNode<'a>;

    async fn find_all(&self, selector: &str) -> Result<Vec<StaticNode<'a>>, DomError> {
        let selector = parse_selector(selector)?;
        let html: &'a Html = self.html;
        Ok(html
            .select(&selector)
            .map(|element| StaticNode { element })
            .collect())
    }
}
