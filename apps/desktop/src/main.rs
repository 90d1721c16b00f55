use std::sync::Arc;

use clap::Parser;
use iced::Size;
use tracing_subscriber::EnvFilter;
use viddigest_core::{ApiClient, ClientConfig, ClipboardService, Runtime};

use crate::page::Page;

mod page;
mod view;

#[derive(Parser)]
#[command(name = "viddigest-desktop")]
#[command(about = "Turn YouTube videos into summaries, key points and timestamps")]
struct Cli {
    /// Base URL of the VidDigest backend
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.api_url.as_deref())?;
    tracing::info!(api_url = %config.api_url, "starting viddigest desktop");

    let runtime = Runtime::new(
        Arc::new(ApiClient::new(config)?),
        ClipboardService::default(),
    );

    iced::application("VidDigest", Page::update, Page::view)
        .window_size(Size::new(900.0, 1000.0))
        .run_with(move || Page::new(runtime))?;

    Ok(())
}
