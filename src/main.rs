//! CLI for SmokeLink
//!
//! Subcommands:
//! - `monitor`: connect and print live telemetry until Ctrl-C
//! - `publish`: send one payload on a topic and exit

use std::time::Duration;

use clap::Parser;
use smokelink::config::{Settings, load_config};
use smokelink::grill::topics;
use smokelink::{PubSubClient, spawn_status_poll};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "smokelink")]
enum Command {
    /// Subscribe to every telemetry topic and print updates
    Monitor {
        /// Controller WebSocket URL (default: connection.address from config)
        #[arg(long)]
        url: Option<String>,
    },
    /// Publish a single payload, then disconnect
    Publish {
        topic: String,
        payload: String,
        /// Controller WebSocket URL (default: connection.address from config)
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cmd = Command::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            smokelink::utils::logging::init("info");
            error!("Invalid configuration, using defaults: {}", e);
            Settings::default()
        }
    };
    smokelink::utils::logging::init(&settings.logging.level);

    let client = PubSubClient::from_settings(&settings);

    match cmd {
        Command::Monitor { url } => {
            if let Err(e) = run_monitor(&client, url.as_deref(), &settings).await {
                error!("Monitor failed: {}", e);
            }
        }
        Command::Publish {
            topic,
            payload,
            url,
        } => {
            if let Err(e) = run_publish(&client, url.as_deref(), &topic, &payload).await {
                error!("Publish failed: {}", e);
            }
        }
    }
}

async fn run_monitor(
    client: &PubSubClient,
    url: Option<&str>,
    settings: &Settings,
) -> smokelink::Result<()> {
    for topic in topics::TELEMETRY {
        client.subscribe(topic, move |payload| println!("{topic:<22} {payload}"));
    }

    client.connect(url).await?;
    let poll = spawn_status_poll(
        client.clone(),
        Duration::from_secs(settings.poll.interval_secs),
    );

    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received. Exiting gracefully.");

    if let Some(poll) = poll {
        poll.abort();
    }
    client.disconnect();
    Ok(())
}

async fn run_publish(
    client: &PubSubClient,
    url: Option<&str>,
    topic: &str,
    payload: &str,
) -> smokelink::Result<()> {
    client.connect(url).await?;
    client.publish(topic, payload);
    client.shutdown().await;
    Ok(())
}
