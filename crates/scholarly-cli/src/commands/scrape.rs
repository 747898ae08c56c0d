use crate::OutputFormat;
use crate::commands::resolve::lookup;
use crate::export::deliver;
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use scholarly_browser::{ScrapeReport, Scraper, ScraperConfig, StopReason, WaitPolicy};
use scholarly_core::{JsonSink, RecordSink};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct ScrapeOptions {
    pub roster: PathBuf,
    pub name: String,
    pub output_dir: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub wait_secs: u64,
    /// `0` disables the cap
    pub max_rounds: usize,
    pub base_url: String,
}

impl ScrapeOptions {
    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            chrome_path: self.chrome_path.clone(),
            wait: WaitPolicy::new(Duration::from_secs(self.wait_secs)),
            max_rounds: (self.max_rounds > 0).then_some(self.max_rounds),
            base_url: self.base_url.clone(),
            ..ScraperConfig::default()
        }
    }
}

pub fn execute(options: ScrapeOptions, format: OutputFormat) -> Result<()> {
    let name = options.name.trim();
    if name.is_empty() {
        anyhow::bail!("Please enter a valid researcher name");
    }

    // Resolution failures stop here, before any browser is started
    let identifier = lookup(&options.roster, name)?;
    let pretty = format == OutputFormat::Pretty;

    if pretty {
        println!("🔎 {} → {}", style(name).bold(), identifier);
    }

    let scraper = Scraper::new(options.scraper_config());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let spinner = spinner(pretty);
    let report = runtime.block_on(scraper.run_report(&identifier));
    spinner.finish_and_clear();

    runtime.shutdown_timeout(Duration::from_millis(100));

    let report = report.context("An error occurred during scraping")?;
    let path = deliver(&report.records, &options.output_dir, name)?;

    if pretty {
        print_summary(name, &report, &path);
    } else {
        JsonSink::new(std::io::stdout().lock()).persist(&report.records)?;
    }

    Ok(())
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(template);
    }
    spinner.set_message("Scraping publications... this may take a while");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn print_summary(name: &str, report: &ScrapeReport, path: &Path) {
    println!(
        "✅ Scraping completed for {}: {} publications",
        style(name).bold(),
        style(report.records.len()).green().bold()
    );
    println!(
        "   {} rounds, {} pages loaded{}",
        report.pagination.rounds,
        report.pagination.clicks + 1,
        match report.pagination.stop {
            StopReason::RoundLimit => " (stopped at --max-rounds)",
            _ => "",
        }
    );
    if report.dropped_rows > 0 {
        println!(
            "   {}",
            style(format!("{} rows could not be read and were skipped", report.dropped_rows)).yellow()
        );
    }
    println!("📄 Saved to {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(max_rounds: usize) -> ScrapeOptions {
        ScrapeOptions {
            roster: PathBuf::from("roster.xlsx"),
            name: "Jane Doe".to_string(),
            output_dir: PathBuf::from("."),
            chrome_path: None,
            wait_secs: 3,
            max_rounds,
            base_url: "https://scholar.google.com".to_string(),
        }
    }

    #[test]
    fn test_zero_max_rounds_is_unbounded() {
        assert_eq!(options(0).scraper_config().max_rounds, None);
        assert_eq!(options(25).scraper_config().max_rounds, Some(25));
    }

    #[test]
    fn test_wait_secs_becomes_wait_policy() {
        assert_eq!(
            options(0).scraper_config().wait.timeout,
            Duration::from_secs(3)
        );
    }
}
