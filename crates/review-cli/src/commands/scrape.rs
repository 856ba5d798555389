use crate::output::Output;
use clap::{ArgAction, Args};
use color_eyre::eyre::Context;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use review_config::{PathManager, ScraperConfig};
use review_models::Review;
use serde_json::json;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

const PREVIEW_TEXT_WIDTH: usize = 60;

#[derive(Args, Debug, Default)]
pub struct ScrapeArgs {
    /// Product review page (overrides target.url)
    #[arg(long)]
    pub url: Option<String>,

    /// CSV destination (overrides export.output_path)
    #[arg(long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Run Chromium without a window
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "no_headless")]
    pub headless: bool,

    /// Show the browser window even when the config asks for headless
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_headless: bool,

    /// Seconds to wait for reviews to render
    #[arg(long, value_name = "N")]
    pub wait_secs: Option<u64>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not save a screenshot and page HTML when the scrape fails
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_diagnostics: bool,

    /// Print a table of the extracted reviews
    #[arg(long, action = ArgAction::SetTrue)]
    pub preview: bool,
}

impl ScrapeArgs {
    /// Command-line flags win over file and environment.
    pub fn apply_to(&self, config: &mut ScraperConfig) {
        if let Some(url) = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            config.target.url = url.to_string();
        }
        if let Some(path) = &self.output_file {
            config.export.output_path = path.clone();
        }
        if self.headless {
            config.browser.headless = true;
        }
        if self.no_headless {
            config.browser.headless = false;
        }
        if let Some(secs) = self.wait_secs {
            config.browser.wait_seconds = secs;
        }
        if self.no_diagnostics {
            config.diagnostics.enabled = false;
        }
    }
}

pub async fn run_scrape(args: ScrapeArgs, output: &Output) -> Result<()> {
    tracing::debug!("Scrape command started");

    let paths = PathManager::default();
    let mut config = super::load_config(args.config.as_deref(), &paths)?;
    args.apply_to(&mut config);
    config
        .validate()
        .wrap_err("Invalid configuration")?;

    let spinner = waiting_spinner(output, &config);
    let result = review_scraper::run_scrape(&config, &paths).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(failure) => {
            for note in diagnostic_notes(&failure.diagnostics.saved) {
                output.warn(note);
            }
            return Err(failure.error).wrap_err("Scrape failed");
        }
    };

    match output.format() {
        crate::output::OutputFormat::Human => {
            if args.preview && !output.is_quiet() {
                println!("{}", preview_table(&outcome.reviews));
            }
            output.success(format!(
                "Saved {} reviews to {}",
                outcome.reviews.len(),
                outcome.output_path.display()
            ));
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&json!({
                "success": true,
                "reviews": outcome.reviews.len(),
                "output_path": outcome.output_path.display().to_string(),
            }));
        }
    }

    Ok(())
}

/// One line per artifact that was actually written for a failed run.
fn diagnostic_notes(saved: &[PathBuf]) -> Vec<String> {
    saved
        .iter()
        .map(|path| format!("Diagnostic saved: {}", path.display()))
        .collect()
}

fn waiting_spinner(output: &Output, config: &ScraperConfig) -> Option<ProgressBar> {
    let interactive = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
    if !interactive || !output.is_human() || output.is_quiet() {
        tracing::info!(operation = "scrape", url = %config.target.url, "Waiting for reviews");
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(format!("Waiting for reviews on {}", config.target.url));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub(crate) fn preview_table(reviews: &[Review]) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["#", "Date", "Author", "Rating", "Photos", "Video", "Tags", "Text"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(comfy_table::Attribute::Bold)),
    );
    for (index, review) in reviews.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(review.date.as_deref().unwrap_or("-")),
            Cell::new(&review.author),
            Cell::new(review.rating.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(review.photo_count),
            Cell::new(review.video_flag()),
            Cell::new(review.tags.joined()),
            Cell::new(truncate(&review.text, PREVIEW_TEXT_WIDTH)),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
