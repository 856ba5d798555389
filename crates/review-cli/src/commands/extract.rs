use crate::output::Output;
use color_eyre::eyre::Context;
use color_eyre::Result;
use review_scraper::{extract_from_html, write_reviews, write_reviews_to_path};
use std::path::PathBuf;

pub async fn run_extract(html: PathBuf, output_file: Option<PathBuf>, output: &Output) -> Result<()> {
    let source = std::fs::read_to_string(&html)
        .wrap_err_with(|| format!("Failed to read {}", html.display()))?;

    let reviews = extract_from_html(&source)
        .await
        .wrap_err_with(|| format!("No reviews found in {}", html.display()))?;

    if let Some(path) = output_file {
        write_reviews_to_path(&path, &reviews)?;
        output.success(format!("Saved {} reviews to {}", reviews.len(), path.display()));
        return Ok(());
    }

    match output.format() {
        crate::output::OutputFormat::Human => {
            write_reviews(std::io::stdout().lock(), &reviews)
                .wrap_err("Failed to write CSV to stdout")?;
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&reviews)?);
        }
    }
    Ok(())
}
