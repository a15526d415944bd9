//! Terminal rendering backend for the bulb panel.
//!
//! Wires the sync core to a console: a fixed-interval refresh loop keeps
//! the panel consistent with the device, stdin lines become user events
//! (`#RRGGBB` submits a color, `toggle` flips power), and every state
//! change prints as one panel line.

use bulb_panel::config::{Config, load_dotenv};
use bulb_panel::{
    BulbEndpoints, DeviceStateStore, HttpPropertyClient, PanelEvent, RenderFrame, RenderSink,
    StaticToken, SyncController, ThingDescription, ViewBinder,
};
use clap::Parser;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;
use url::Url;

#[derive(Parser)]
#[command(name = "bulb-panel")]
#[command(about = "Terminal panel for a color smart bulb")]
struct Cli {
    /// Gateway base URL
    #[arg(long)]
    gateway: Option<String>,

    /// Thing href, relative to the gateway base
    #[arg(long)]
    thing: Option<String>,

    /// Bearer token for property requests
    #[arg(long)]
    token: Option<String>,

    /// Seconds between refresh cycles
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Path to a thing description JSON file
    #[arg(long)]
    description: Option<String>,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

/// Renders frames as single console lines.
struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn apply(&self, frame: &RenderFrame) {
        let label = frame.power_label.unwrap_or("unknown");
        let fill = frame.icon_fill.as_deref().unwrap_or("-");
        let contrast = if frame.bright { " [bright]" } else { "" };
        println!("bulb: {label}  fill {fill}{contrast}");
    }
}

fn load_description(config: &Config) -> bulb_panel::Result<ThingDescription> {
    match &config.gateway.description_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(ThingDescription::with_default_paths(
            &config.panel.name,
            &config.gateway.thing_href,
        )),
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_logger();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(gateway) = cli.gateway {
        config.gateway.base_url = gateway;
    }
    if let Some(thing) = cli.thing {
        config.gateway.thing_href = thing;
    }
    if let Some(token) = cli.token {
        config.gateway.token = token;
    }
    if let Some(secs) = cli.poll_interval {
        config.panel.poll_interval_secs = secs;
    }
    if let Some(path) = cli.description {
        config.gateway.description_path = Some(path);
    }

    info!("Starting bulb panel");
    info!("  Gateway: {}", config.gateway.base_url);
    info!("  Thing:   {}", config.gateway.thing_href);
    info!("  Poll:    every {}s", config.panel.poll_interval_secs);

    let base = match Url::parse(&config.gateway.base_url) {
        Ok(url) => url,
        Err(e) => {
            error!("Invalid gateway URL: {}", e);
            std::process::exit(1);
        }
    };

    let description = match load_description(&config) {
        Ok(description) => description,
        Err(e) => {
            error!("Failed to load thing description: {}", e);
            std::process::exit(1);
        }
    };

    let endpoints = match BulbEndpoints::resolve(&base, &description) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("Failed to resolve property endpoints: {}", e);
            std::process::exit(1);
        }
    };

    let credentials = Arc::new(StaticToken(config.gateway.token.clone()));
    let client = HttpPropertyClient::new(endpoints, credentials);

    let store = Arc::new(DeviceStateStore::new());
    let view = ViewBinder::new(store.clone(), Box::new(ConsoleSink));
    let controller = Arc::new(SyncController::new(client, store, view));

    // First refresh at construction, before the poll loop takes over.
    controller.refresh().await;

    let poll_controller = controller.clone();
    let poll_secs = config.panel.poll_interval_secs;
    let poll_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(poll_secs));
        interval.tick().await; // first tick fires immediately, already refreshed
        loop {
            interval.tick().await;
            poll_controller.refresh().await;
        }
    });

    let (event_tx, mut event_rx) = mpsc::channel::<PanelEvent>(16);

    let input_task = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            let event = match line {
                "" => continue,
                "toggle" => PanelEvent::PowerToggled,
                color if color.starts_with('#') => PanelEvent::ColorSubmitted(color.to_string()),
                other => {
                    warn!("Ignoring input: {:?} (expected \"toggle\" or \"#RRGGBB\")", other);
                    continue;
                }
            };
            if event_tx.send(event).await.is_err() {
                break;
            }
        }
    });

    let dispatch_controller = controller.clone();
    let dispatch_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            dispatch_controller.handle_event(event).await;
        }
    });

    info!("Panel running; type \"toggle\" or \"#RRGGBB\", Ctrl+C to exit");

    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }

    poll_task.abort();
    input_task.abort();
    dispatch_task.abort();
    info!("Bulb panel stopped");
}
