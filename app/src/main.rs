//! Terminal front end: reads commands from stdin and prints the state
//! through the feature selectors after each one.
//!
//! Run with:
//! ```bash
//! RUST_LOG=remote_data_service=debug cargo run --bin remote-data
//! ```

use anyhow::Context;
use remote_data_app::command::{Command, HELP};
use remote_data_app::config::AppConfig;
use remote_data_app::{App, view};
use remote_data_runtime::metrics::MetricsServer;
use remote_data_service::ReqwestCall;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "remote_data_app=info,remote_data_runtime=info,remote_data_service=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    if let Some(addr) = config.metrics_addr {
        MetricsServer::new(addr)
            .start()
            .context("Failed to start metrics server")?;
    }

    let app = App::start(&config, ReqwestCall::new());

    println!("{HELP}\n");
    println!("{}", view::render(&app.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match command {
            Command::Help => println!("{HELP}"),
            Command::ShowState => {
                let state = app.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&state)?);
            },
            command => {
                if let Err(error) = app.execute(&command).await {
                    println!("{error}");
                }
                println!("{}", view::render(&app.snapshot().await));
            },
        }
    }

    app.shutdown().await?;
    Ok(())
}
