//! CSS selectors for the review markup, most reliable first.
//!
//! Review pages mix schema.org microdata (`itemprop=...`) with the site's own
//! BEM classes, and neither is present on every entry, so most fields are an
//! ordered chain of sources rather than a single selector.

use crate::extract::FieldSource;
use crate::extract::FieldSource::{Attribute, Temporal, Text};

/// One review entry, microdata or site markup.
pub const REVIEW_CONTAINER: &str = "li[itemprop='review'], li.comments__item.feedback";

pub const DATE_CHAIN: &[FieldSource] = &[
    Temporal("time[itemprop='datePublished']"),
    Temporal("meta[itemprop='datePublished']"),
    Temporal(".feedback__date"),
    Temporal("[data-date]"),
    Temporal("[data-published]"),
    Temporal("time"),
];

/// Document-wide date hint, consulted only when the review itself has none.
pub const PAGE_DATE: FieldSource = Attribute {
    selector: "meta[itemprop='datePublished'], meta[name='date']",
    name: "content",
};

pub const AUTHOR_CHAIN: &[FieldSource] = &[
    Attribute { selector: "meta[itemprop='author']", name: "content" },
    Text(".feedback__header"),
    Text("[itemprop='author'], .user-name"),
];

pub const TEXT_CHAIN: &[FieldSource] = &[
    Text("p[itemprop='reviewBody'], .feedback__text.j-feedback__text"),
];

pub const RATING: &str = ".feedback__rating";

pub const PHOTOS: &str = "ul.feedback__photos li.feedback__photo img";

pub const VIDEO: &str = "button.feedback__video-btn, .feedback__video-btn";

/// Tag sources in output order: explicit tags, product parameters, status badges.
pub const TAG_GROUPS: &[&str] = &[
    ".feedback__tags .tag, .feedback__tags span, .feedback__tags li",
    ".feedback__params .feedback__params-item--color, .feedback__params .feedback__params-item--gray, .feedback__params li, .feedback__params span",
    ".feedback__pinned, .feedback__badge, .feedback__flag",
];

/// Section headers looked for in the body when a review has no tag nodes.
pub const SECTION_KEYWORDS: &[&str] = &[
    "Pros",
    "Cons",
    "Comment",
    "Достоинства",
    "Недостатки",
    "Комментарий",
    "Плюсы",
    "Минусы",
];
