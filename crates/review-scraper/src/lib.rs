pub mod browser;
pub mod dom;
pub mod error;
pub mod export;
pub mod extract;
pub mod loader;
pub mod runner;
pub mod selectors;

pub use browser::BrowserSession;
pub use dom::{DomDocument, DomError, DomNode, ReviewPage};
pub use dom::static_html::{StaticDocument, StaticNode, StaticPage};
pub use error::ScrapeError;
pub use export::{write_reviews, write_reviews_to_path, EXPORT_HEADER};
pub use extract::{extract_from_html, extract_review, extract_reviews};
pub use loader::{load_reviews, wait_until, WaitPolicy};
pub use runner::{run_scrape, scrape_page, ScrapeFailure, ScrapeOutcome};

#[cfg(test)]
mod testing;
