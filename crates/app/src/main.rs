//! Saaf: terminal chat front-end for the phrase simplifier.
//!
//! Reads one line per request, hands it to the engine, and prints the result
//! tagged with the mode that actually produced it. The engine keeps working
//! offline when no API key is configured or the network is down.

use anyhow::Result;
use engine::{EngineConfig, EngineHandle, Orchestrator, SubmitError};
use providers::gemini::GeminiClient;
use providers::OnlineSimplify;
use services::network::NetworkChecker;
use shared::error::ApiError;
use shared::settings::AppSettings;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn build_online(settings: &AppSettings) -> Option<Box<dyn OnlineSimplify>> {
    match GeminiClient::from_settings(settings) {
        Ok(client) => Some(Box::new(client)),
        Err(ApiError::NoKey) => {
            tracing::info!("no API key configured, running offline only");
            None
        }
        Err(e) => {
            tracing::warn!("online client unavailable: {}", e);
            None
        }
    }
}

fn print_banner(online_configured: bool) {
    println!("Saaf — phrase simplifier for Urdu, Punjabi, and Roman Urdu");
    if online_configured {
        println!("Online mode available; falls back to offline rules when needed.");
    } else {
        println!("Offline mode (set GEMINI_API_KEY to enable online simplification).");
    }
    println!("Commands: /history  /reset  /quit");
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = AppSettings::load();
    let online = build_online(&settings);
    let online_configured = online.is_some();

    let orchestrator = Orchestrator::new(
        online,
        Box::new(NetworkChecker::new()),
        EngineConfig::from_settings(&settings),
    );
    let handle = EngineHandle::spawn(orchestrator);

    print_banner(online_configured);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                handle.reset().ok();
                println!("Session cleared.");
                continue;
            }
            "/history" => {
                let history = handle.history().await.unwrap_or_default();
                if history.is_empty() {
                    println!("No exchanges yet.");
                }
                for entry in history {
                    println!(
                        "[{} | {}] {} -> {}",
                        entry.utterance.language.as_str(),
                        entry.mode.as_str(),
                        entry.utterance.text,
                        entry.output
                    );
                }
                continue;
            }
            text => match handle.submit(text).await {
                Ok(result) => {
                    println!("[{}] {}", result.mode.as_str(), result.output);
                    if let Some(reason) = &result.error_reason {
                        tracing::debug!("offline because: {}", reason);
                    }
                }
                Err(SubmitError::EmptyInput) => continue,
                Err(SubmitError::EngineClosed) => {
                    tracing::error!("engine stopped, exiting");
                    break;
                }
            },
        }
    }

    Ok(())
}
