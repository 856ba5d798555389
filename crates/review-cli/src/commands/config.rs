use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use review_config::{PathManager, ScraperConfig};
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    match cmd {
        ConfigCommands::Show => show_config(&paths, output),
        ConfigCommands::Init { force } => {
            paths
                .ensure_directories()
                .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
            init_config(&paths.config_file(), force, output)
        }
    }
}

fn show_config(paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = super::load_config(None, paths)?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            if !config_file.exists() {
                output.warn(format!(
                    "No configuration file at {}, showing defaults. Run 'review-scraper config init' to create one.",
                    config_file.display()
                ));
            }
            println!("{}", config_table(&config_file, &config));
            if let Err(e) = config.validate() {
                output.warn(format!("Configuration is not ready to scrape: {}", e));
            }
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&serde_json::json!({
                "config_file": config_file.display().to_string(),
                "config": serde_json::to_value(&config)?,
            }));
        }
    }
    Ok(())
}

fn init_config(config_file: &Path, force: bool, output: &Output) -> Result<()> {
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    ScraperConfig::default()
        .save_to_file(config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.info("Set target.url (or REVIEW_SCRAPER_URL) before running 'review-scraper scrape'.");
    Ok(())
}

fn flag(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}

fn config_table(config_file: &Path, config: &ScraperConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);

    let url = if config.target.url.is_empty() { "(not set)".to_string() } else { config.target.url.clone() };
    let browser = &config.browser;
    let rows: Vec<(&str, String)> = vec![
        ("Target URL", url),
        ("Headless", flag(browser.headless)),
        ("Wait", format!("{} s, polling every {} ms", browser.wait_seconds, browser.poll_interval_ms)),
        ("Window", format!("{}x{}", browser.window_width, browser.window_height)),
        (
            "Chrome Executable",
            browser
                .chrome_executable
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto-detect".to_string()),
        ),
        ("CSV Output", config.export.output_path.display().to_string()),
        ("Diagnostics", flag(config.diagnostics.enabled)),
        ("Diagnostics Directory", config.diagnostics.output_dir.display().to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
