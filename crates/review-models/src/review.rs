use serde::{Deserialize, Serialize};
use crate::tags::Tags;

/// One customer review as extracted from a product page.
///
/// Fields that could not be located on the page are `None` or empty; a
/// `Review` never carries an error state of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Review {
    /// Publication date exactly as the page shows it (not parsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub author: String,
    pub text: String,
    /// Star rating on the site's own scale (usually 1-5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub photo_count: u32,
    pub has_video: bool,
    pub tags: Tags,
}

impl Review {
    /// Has-video column token used in exports.
    pub fn video_flag(&self) -> &'static str {
        if self.has_video { "yes" } else { "no" }
    }

    /// True when nothing but defaults could be extracted.
    pub fn is_blank(&self) -> bool {
        self.date.is_none()
            && self.author.is_empty()
            && self.text.is_empty()
            && self.rating.is_none()
            && self.photo_count == 0
            && !self.has_video
            && self.tags.is_empty()
    }
}
