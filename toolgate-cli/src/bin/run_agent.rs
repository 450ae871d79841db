//! Interactive agent that reaches its tools through a provisioned gateway.

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use toolgate_cli::init_tracing;
use toolgate_core::auth::fetch_access_token;
use toolgate_core::config::{SelectionError, choose_config_file, ensure_env_loaded};
use toolgate_core::constants::{MODEL_ID, SYSTEM_PROMPT};
use toolgate_core::model::BedrockConverseModel;
use toolgate_core::{
    CatalogLimits, GatewayAgent, GatewayConfig, GatewayMcpClient, list_all_tools, run_session,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "run-agent",
    version,
    about = "Chat with an agent whose tools come from an AgentCore gateway"
)]
struct Args {
    /// Config file name, or the 4-digit suffix of a gateway_config_<suffix>.json
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    ensure_env_loaded();
    init_tracing("warn");

    let cwd = std::env::current_dir()?;
    let Some(config_path) = select_config(&cwd, args.config.as_deref()) else {
        eprintln!("❌ Error: No gateway_config_*.json found!");
        eprintln!("Please run 'setup-gateway' to create the Gateway.");
        std::process::exit(1);
    };

    let config = match GatewayConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ Error loading config '{}': {err}", config_path.display());
            std::process::exit(1);
        }
    };

    println!("Using config: {}", config_path.display());
    println!("Getting access token...");
    let http = reqwest::Client::new();
    let access_token = fetch_access_token(&http, &config.client_info).await?;
    println!("✓ Access token obtained\n");

    println!("🤖 Starting AgentCore Gateway Test Agent");
    println!("Gateway URL: {}", config.gateway_url);
    println!("Model: {MODEL_ID}");
    println!("{}", "-".repeat(60));

    let model = BedrockConverseModel::for_region(config.region, MODEL_ID).await;
    let client = GatewayMcpClient::connect(config.gateway_url.as_str(), access_token).await?;

    let outcome = chat(model, &client).await;
    if let Err(err) = client.close().await {
        warn!(error = %err, "failed to close gateway session");
    }
    outcome
}

/// `None` means setup has not been run, or the requested config is missing.
fn select_config(dir: &Path, cli_arg: Option<&str>) -> Option<PathBuf> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    match choose_config_file(dir, cli_arg, &mut input, &mut output) {
        Ok(selection) => selection,
        Err(SelectionError::NotFound(arg)) => {
            eprintln!("❌ Specified config '{arg}' not found.");
            None
        }
        Err(err) => {
            warn!(error = %err, "config selection aborted");
            None
        }
    }
}

async fn chat(model: BedrockConverseModel, client: &GatewayMcpClient) -> Result<(), Box<dyn Error>> {
    let tools = list_all_tools(client, CatalogLimits::default()).await?;
    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
    println!("\n📋 Available tools: {names:?}");
    println!("{}", "-".repeat(60));

    let mut agent = GatewayAgent::new(model, client, tools).with_system_prompt(SYSTEM_PROMPT);
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    match run_session(&mut agent, input, &mut output).await {
        Ok(summary) => {
            info!(turns = summary.turns, ended_by = ?summary.ended_by, "session finished");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            Err(err.into())
        }
    }
}
