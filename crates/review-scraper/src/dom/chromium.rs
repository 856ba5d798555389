use async_trait::async_trait;
use chromiumoxide::{Element, Page};
use super::{DomDocument, DomError, DomNode, ReviewPage};

#[async_trait(?Send)]
impl DomNode for Element {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        Ok(self.find_elements(selector).await?)
    }

    async fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError> {
        // find_element reports "no match" as a CDP error; an empty querySelectorAll does not
        Ok(self.find_elements(selector).await?.into_iter().next())
    }

    async fn tag_name(&self) -> Result<String, DomError> {
        let returns = self
            .call_js_fn("function() { return this.tagName; }", false)
            .await?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_lowercase))
            .unwrap_or_default())
    }

    async fn text(&self) -> Result<String, DomError> {
        Ok(self.inner_text().await?.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError> {
        Ok(Element::attribute(self, name).await?)
    }
}

#[async_trait(?Send)]
impl DomDocument for Page {
    type Node = Element;

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>, DomError> {
        Ok(self.find_elements(selector).await?)
    }
}

#[async_trait(?Send)]
impl ReviewPage for Page {
    async fn navigate(&self, url: &str) -> Result<(), DomError> {
        self.goto(url).await?;
        Ok(())
    }
}
