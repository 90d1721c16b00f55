use std::{sync::Arc, time::Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;
use viddigest_core::{
    AnalysisApi, ApiClient, App, ClientConfig, ClipboardService, CopyKind, Driver, Effect,
    Message, Phase, Runtime, extract_video_id, format_analysis_readable,
    app::{COPIED_LABEL, COPY_FAILED, NOTHING_TO_COPY},
    health::MODEL_NOT_LOADED_WARNING,
};

use crate::output::{ToastEcho, create_spinner, format_elapsed};

mod output;

/// CLI wrapper for CopyKind (needed for clap ValueEnum)
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliCopyKind {
    Summary,
    Timestamps,
}

impl From<CliCopyKind> for CopyKind {
    fn from(cli: CliCopyKind) -> Self {
        match cli {
            CliCopyKind::Summary => CopyKind::Summary,
            CliCopyKind::Timestamps => CopyKind::Timestamps,
        }
    }
}

#[derive(Parser)]
#[command(name = "viddigest")]
#[command(about = "Summarize YouTube videos through a VidDigest backend")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Video URL
    url: Option<String>,

    /// Base URL of the VidDigest backend
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print the raw analysis as JSON instead of the readable report
    #[arg(long)]
    json: bool,

    /// Copy part of the result to the clipboard
    #[arg(short, long)]
    copy: Option<CliCopyKind>,

    /// Don't ask the backend whether the model is loaded first
    #[arg(long)]
    skip_health: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the backend is up and its model is loaded
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.api_url.as_deref())?;
    let client = ApiClient::new(config)?;

    let ok = match (&cli.command, &cli.url) {
        (Some(Command::Health), _) => check_health(&client).await,
        (None, Some(url)) => analyze(&cli, client, url).await?,
        (None, None) => {
            eprintln!(
                "{} {}",
                style("Error:").red().bold(),
                viddigest_core::ValidationError::MissingUrl
            );
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn check_health(client: &ApiClient) -> bool {
    match client.health().await {
        Ok(health) if health.model_loaded => {
            println!(
                "{} {} is up, model loaded",
                style("✓").green().bold(),
                client.config().api_url
            );
            true
        }
        Ok(_) => {
            println!("{} {}", style("!").yellow().bold(), MODEL_NOT_LOADED_WARNING);
            true
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            false
        }
    }
}

/// The process exits right after `--copy`, so the copy has to outlive it.
fn clipboard() -> ClipboardService {
    ClipboardService::persistent()
}

async fn analyze(cli: &Cli, client: ApiClient, url: &str) -> Result<bool> {
    println!(
        "\n{}  {}\n",
        style("viddigest").cyan().bold(),
        style(client.config().api_url.as_str()).dim()
    );

    let runtime = Runtime::new(Arc::new(client), clipboard());
    let (app, mut effects) = App::boot();
    if cli.skip_health {
        effects.retain(|e| !matches!(e, Effect::CheckHealth));
    }
    let mut driver = Driver::new(app, runtime, effects);
    let mut toasts = ToastEcho::default();

    driver.dispatch(Message::UrlChanged(url.to_string()));
    driver.dispatch(Message::Submit);

    if let Phase::Error(message) = driver.app().phase() {
        eprintln!("{} {}", style("Error:").red().bold(), message);
        return Ok(false);
    }

    if let Some(id) = extract_video_id(url) {
        println!("{} Video {}", style("✓").green().bold(), style(id).yellow());
    }

    let started = Instant::now();
    let spinner = create_spinner(driver.app().loading_text())?;
    driver
        .run_until(|app| {
            spinner.set_message(app.loading_text().to_string());
            toasts.echo(app, Some(&spinner));
            !app.phase().is_loading()
        })
        .await;

    let elapsed = style(format!("[{}]", format_elapsed(started.elapsed()))).dim();
    let analysis = match driver.app().phase() {
        Phase::Results => {
            spinner.finish_with_message(format!(
                "{} Analyzed {}",
                style("✓").green().bold(),
                elapsed
            ));
            driver.app().current().cloned()
        }
        Phase::Error(message) => {
            spinner.finish_with_message(format!(
                "{} {} {}",
                style("✗").red().bold(),
                message,
                elapsed
            ));
            None
        }
        _ => {
            spinner.finish_and_clear();
            None
        }
    };
    toasts.echo(driver.app(), None);

    let Some(analysis) = analysis else {
        return Ok(false);
    };

    println!("{}", style("─".repeat(60)).dim());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", format_analysis_readable(&analysis));
    }

    if let Some(kind) = cli.copy {
        let kind = CopyKind::from(kind);
        driver.dispatch(Message::Copy(kind));
        driver
            .run_until(|app| {
                app.copy_label(kind) == COPIED_LABEL
                    || app
                        .notifications()
                        .iter()
                        .any(|n| n.message == COPY_FAILED || n.message == NOTHING_TO_COPY)
            })
            .await;
        toasts.echo(driver.app(), None);
    }

    Ok(true)
}
