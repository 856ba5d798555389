//! Best-effort field extraction for review nodes.
//!
//! A missing or unreadable field becomes `None` / empty on the record and is
//! logged at debug level; it never fails the review or the run.

use regex::Regex;
use review_models::{Review, Tags};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::dom::static_html::StaticDocument;
use crate::dom::{DomDocument, DomNode};
use crate::error::ScrapeError;
use crate::selectors;

#[cfg(test)]
mod tests;

static RATING_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"star(\d+)").expect("rating pattern"));

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = selectors::SECTION_KEYWORDS.join("|");
    Regex::new(&format!("(?i)(?:{alternatives}):")).expect("section header pattern")
});

/// One way of reading a field from a review node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Visible text of the first match.
    Text(&'static str),
    /// Named attribute of the first match.
    Attribute {
        selector: &'static str,
        name: &'static str,
    },
    /// Date-like read of the first match; what is read depends on its tag.
    Temporal(&'static str),
}

impl FieldSource {
    pub fn selector(&self) -> &'static str {
        match *self {
            FieldSource::Text(selector) | FieldSource::Temporal(selector) => selector,
            FieldSource::Attribute { selector, .. } => selector,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

async fn text_of<N: DomNode>(node: &N) -> Option<String> {
    match node.text().await {
        Ok(text) => non_blank(Some(text)),
        Err(e) => {
            debug!(error = %e, "Failed to read element text");
            None
        }
    }
}

async fn attribute_of<N: DomNode>(node: &N, name: &str) -> Option<String> {
    match node.attribute(name).await {
        Ok(value) => non_blank(value),
        Err(e) => {
            debug!(attribute = name, error = %e, "Failed to read element attribute");
            None
        }
    }
}

/// `<meta>` carries the date in `content`, `<time>` in `datetime`; anything
/// else may use data attributes before falling back to its text.
async fn temporal_of<N: DomNode>(node: &N) -> Option<String> {
    let tag = node.tag_name().await.unwrap_or_default();
    match tag.as_str() {
        "meta" => attribute_of(node, "content").await,
        "time" => match attribute_of(node, "datetime").await {
            Some(value) => Some(value),
            None => text_of(node).await,
        },
        _ => {
            if let Some(value) = attribute_of(node, "data-date").await {
                return Some(value);
            }
            if let Some(value) = attribute_of(node, "data-published").await {
                return Some(value);
            }
            text_of(node).await
        }
    }
}

async fn first_match<N: DomNode>(scope: &N, selector: &str) -> Option<N> {
    match scope.find_first(selector).await {
        Ok(found) => found,
        Err(e) => {
            debug!(selector, error = %e, "Lookup failed");
            None
        }
    }
}

async fn all_matches<N: DomNode>(scope: &N, selector: &str) -> Vec<N> {
    scope.find_all(selector).await.unwrap_or_else(|e| {
        debug!(selector, error = %e, "Lookup failed");
        Vec::new()
    })
}

async fn read_found<N: DomNode>(found: &N, source: FieldSource) -> Option<String> {
    match source {
        FieldSource::Text(_) => text_of(found).await,
        FieldSource::Attribute { name, .. } => attribute_of(found, name).await,
        FieldSource::Temporal(_) => temporal_of(found).await,
    }
}

async fn read_source<N: DomNode>(node: &N, source: FieldSource) -> Option<String> {
    let found = first_match(node, source.selector()).await?;
    read_found(&found, source).await
}

/// Try each source in order and keep the first non-blank value.
pub async fn resolve_field<N: DomNode>(node: &N, chain: &[FieldSource]) -> Option<String> {
    for source in chain {
        if let Some(value) = read_source(node, *source).await {
            return Some(value);
        }
    }
    None
}

async fn extract_date<D: DomDocument>(node: &D::Node, document: &D) -> Option<String> {
    if let Some(date) = resolve_field(node, selectors::DATE_CHAIN).await {
        return Some(date);
    }

    let selector = selectors::PAGE_DATE.selector();
    let candidates = match document.find_all(selector).await {
        Ok(found) => found,
        Err(e) => {
            debug!(selector, error = %e, "Page-wide date lookup failed");
            return None;
        }
    };
    match candidates.first() {
        Some(meta) => read_found(meta, selectors::PAGE_DATE).await,
        None => None,
    }
}

async fn extract_rating<N: DomNode>(node: &N) -> Option<u8> {
    let rating_node = first_match(node, selectors::RATING).await?;
    let classes = attribute_of(&rating_node, "class").await?;
    parse_rating_class(&classes)
}

/// Numeral from a `star<N>` class token, e.g. `"feedback__rating stars-line star4"` -> 4.
pub fn parse_rating_class(classes: &str) -> Option<u8> {
    RATING_CLASS
        .captures(classes)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Section headers such as `Pros:` found in a review body, colon stripped.
pub fn section_keywords(body: &str) -> Vec<String> {
    SECTION_HEADER
        .find_iter(body)
        .map(|m| m.as_str().trim_end_matches(':').trim().to_string())
        .collect()
}

async fn extract_tags<N: DomNode>(node: &N, body: &str) -> Tags {
    let mut tags = Tags::new();
    for group in selectors::TAG_GROUPS {
        for tag_node in all_matches(node, group).await {
            if let Some(text) = text_of(&tag_node).await {
                tags.push(text);
            }
        }
    }

    // Heuristic: without tag markup, body section headers stand in for tags.
    if tags.is_empty() {
        tags.extend(section_keywords(body));
    }
    tags
}

/// Build a record from one review node.
///
/// Returns `None` only when the node itself can no longer be queried, e.g.
/// a live element detached from the page.
pub async fn extract_review<D: DomDocument>(node: &D::Node, document: &D) -> Option<Review> {
    if let Err(e) = node.tag_name().await {
        warn!(error = %e, "Review node is no longer readable, skipping");
        return None;
    }

    let date = extract_date(node, document).await;
    let author = resolve_field(node, selectors::AUTHOR_CHAIN).await.unwrap_or_default();
    let text = resolve_field(node, selectors::TEXT_CHAIN).await.unwrap_or_default();
    let rating = extract_rating(node).await;
    let photo_count = all_matches(node, selectors::PHOTOS).await.len() as u32;
    let has_video = first_match(node, selectors::VIDEO).await.is_some();
    let tags = extract_tags(node, &text).await;

    Some(Review {
        date,
        author,
        text,
        rating,
        photo_count,
        has_video,
        tags,
    })
}

/// Extract every node in order, dropping the ones that cannot be read at all.
pub async fn extract_reviews<D: DomDocument>(nodes: &[D::Node], document: &D) -> Vec<Review> {
    let mut reviews = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        match extract_review(node, document).await {
            Some(review) => {
                if review.is_blank() {
                    debug!(index, "Review node produced no data");
                }
                reviews.push(review);
            }
            None => warn!(index, "Dropped unreadable review node"),
        }
    }
    info!("Extracted {} of {} review nodes", reviews.len(), nodes.len());
    reviews
}

/// Run the extractor over saved page markup, no browser involved.
pub async fn extract_from_html(source: &str) -> Result<Vec<Review>, ScrapeError> {
    let document = StaticDocument::parse(source);
    let page = document.page();
    let nodes = page
        .find_all(selectors::REVIEW_CONTAINER)
        .await
        .unwrap_or_default();
    if nodes.is_empty() {
        return Err(ScrapeError::ReviewsNotFound {
            selector: selectors::REVIEW_CONTAINER.to_string(),
            waited: Duration::ZERO,
        });
    }
    Ok(extract_reviews(&nodes, &page).await)
}
