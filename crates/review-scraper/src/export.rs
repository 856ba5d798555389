use csv::Writer;
use review_models::Review;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;
use crate::error::ScrapeError;

pub const EXPORT_HEADER: [&str; 7] = [
    "Date Published",
    "Author",
    "Review Text",
    "Rating",
    "Photo Count",
    "Has Video",
    "Tags",
];

fn review_row(review: &Review) -> [String; 7] {
    [
        review.date.clone().unwrap_or_default(),
        review.author.clone(),
        review.text.clone(),
        review.rating.map(|r| r.to_string()).unwrap_or_default(),
        review.photo_count.to_string(),
        review.video_flag().to_string(),
        review.tags.joined(),
    ]
}

/// Write the header and one row per review.
pub fn write_reviews<W: Write>(writer: W, reviews: &[Review]) -> csv::Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADER)?;
    for review in reviews {
        csv.write_record(review_row(review))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the export file, creating parent directories as needed.
pub fn write_reviews_to_path(path: &Path, reviews: &[Review]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_reviews(file, reviews).map_err(|source| ScrapeError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    info!("CSV saved to: {}", path.display());
    Ok(())
}
