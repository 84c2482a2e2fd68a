use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ChartPoller, ChartRenderer, ClientSettings, DashboardApi, FeedbackForm, FeedbackOutcome,
    FeedbackSubmitter, LineChart, SettingsService, SubmitEvent, ThemeManager, ThemeTarget,
    UserNotifier,
};
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Command-line client for the CO2 dashboard")]
struct Args {
    /// Overrides the configured server URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a feedback verdict ("1" = prediction was correct).
    Feedback {
        #[arg(long)]
        is_correct: String,
    },
    /// Poll /data and print every refreshed series.
    Poll {
        /// Stop after this many successful refreshes.
        #[arg(long)]
        count: Option<u64>,
    },
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Set { name: String },
}

struct ConsoleNotifier;

impl UserNotifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn navigate(&self, location: &str) {
        println!("-> {location}");
    }
}

struct ConsoleTheme;

impl ThemeTarget for ConsoleTheme {
    fn set_root_class(&self, class: &str) {
        println!("theme: {class}");
    }
}

struct PrintRenderer;

impl ChartRenderer for PrintRenderer {
    fn redraw(&self, chart: &LineChart) {
        match serde_json::to_string(&chart.series()) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!("failed to serialize chart series: {err}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = client_core::load_settings()?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let api = DashboardApi::new(settings.server_url.clone());

    match args.command {
        Command::Feedback { is_correct } => submit_feedback(&settings, api, is_correct).await,
        Command::Poll { count } => poll(&settings, api, count).await,
        Command::Theme { action } => theme(&settings, action).await,
    }
}

async fn submit_feedback(settings: &ClientSettings, api: DashboardApi, is_correct: String) -> Result<()> {
    let submitter = FeedbackSubmitter::new(api, Arc::new(ConsoleNotifier))
        .with_messages(settings.feedback_messages())
        .with_local_acknowledgement(settings.local_acknowledgement);

    let outcome = submitter
        .submit(&mut SubmitEvent::new(), &FeedbackForm::with_is_correct(is_correct))
        .await?;
    if let FeedbackOutcome::Rejected { status } = outcome {
        anyhow::bail!("feedback rejected with status {status}");
    }
    Ok(())
}

async fn poll(settings: &ClientSettings, api: DashboardApi, count: Option<u64>) -> Result<()> {
    let poller = Arc::new(
        ChartPoller::new(api, Arc::new(PrintRenderer)).with_interval(settings.poll_interval()),
    );

    let Some(count) = count else {
        poller.spawn().await.context("poll loop stopped")?;
        return Ok(());
    };

    let mut refreshed = 0;
    let mut ticker = tokio::time::interval(settings.poll_interval());
    while refreshed < count {
        ticker.tick().await;
        match poller.refresh().await {
            Ok(_) => refreshed += 1,
            Err(err) => tracing::warn!("co2 chart refresh failed: {err}"),
        }
    }
    Ok(())
}

async fn theme(settings: &ClientSettings, action: ThemeAction) -> Result<()> {
    let storage = Storage::new(&settings.settings_database_url).await?;
    let service = SettingsService::new(Arc::new(storage)).with_default_theme(settings.default_theme());

    match action {
        ThemeAction::Show => {
            println!("{}", service.theme().await?);
        }
        ThemeAction::Set { name } => {
            ThemeManager::new(service, Arc::new(ConsoleTheme))
                .set_theme(name)
                .await?;
        }
    }
    Ok(())
}
