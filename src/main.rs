use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use course_sweep::browser::ChromiumSession;
use course_sweep::config::ScrapeConfig;
use course_sweep::engine::{run, JitterPacer};
use course_sweep::ops::{init_tracing_with, LogFormat, DEFAULT_FILTER};
use course_sweep::persistence::{save_records, SaveOutcome};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "course_sweep",
    version,
    about = "Scrapes course duration, level and concepts for a list of search keywords"
)]
struct Cli {
    /// Search keyword; repeat for several. Defaults to the built-in language list.
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show the browser window.
    #[arg(long, default_value_t = false)]
    headed: bool,

    #[arg(long, value_name = "N")]
    max_idle_scrolls: Option<u32>,

    /// Extra attempts per course page after a transient failure.
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Readiness timeout per page.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Disable every randomized pause.
    #[arg(long, default_value_t = false)]
    no_pacing: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> ScrapeConfig {
        let mut config = ScrapeConfig::default();
        if !self.keywords.is_empty() {
            config.keywords = self.keywords;
        }
        if let Some(path) = self.output {
            config.output_path = path;
        }
        if let Some(n) = self.max_idle_scrolls {
            config.max_idle_scrolls = n;
        }
        if let Some(n) = self.retries {
            config.retry_detail = n;
        }
        if let Some(secs) = self.timeout_secs {
            config.ready_timeout = Duration::from_secs(secs);
        }
        if let Some(ua) = self.user_agent {
            config.user_agent = ua;
        }
        config.headless = !self.headed;
        if self.no_pacing {
            config = config.without_pacing();
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing_with(format, DEFAULT_FILTER);

    let config = cli.into_config();
    info!(
        keywords = config.keywords.len(),
        output = %config.output_path.display(),
        headless = config.headless,
        "Course sweep starting"
    );

    let mut session = match ChromiumSession::launch(&config).await {
        Ok(session) => session,
        Err(e) => {
            error!("Could not start browser: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = run(&mut session, &config, &JitterPacer).await;

    // * Release the browser before touching the filesystem
    session.shutdown().await;

    let summary = &outcome.summary;
    info!(
        scraped = summary.total_scraped(),
        dropped = summary.total_dropped(),
        failed_keywords = ?summary.failed_keywords,
        success_rate = summary.success_rate(),
        "Scrape finished"
    );

    match save_records(&outcome.records, &config.output_path) {
        SaveOutcome::Saved(path) | SaveOutcome::Fallback { written: path, .. } => {
            info!(path = %path.display(), "Done");
        }
        SaveOutcome::Preview(_) => {
            error!("No CSV could be written; see the preview above");
        }
    }
}
