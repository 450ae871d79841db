//! Provisions an authorizer, gateway and function target, then writes the
//! `gateway_config_<suffix>.json` the runner reads.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use toolgate_cli::{format_elapsed, init_tracing, random_suffix};
use toolgate_core::config::{config_file_name, ensure_env_loaded};
use toolgate_core::constants::DEFAULT_REGION;
use toolgate_core::{GatewayConfig, ResourceNames};
use toolgate_provision::{
    GatewayProvisioner, IAM_PROPAGATION_DELAY, LambdaSource, ProvisionError, ReadinessPolicy,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "setup-gateway",
    version,
    about = "Create a gateway with a function target and save its configuration"
)]
struct Args {
    /// Use an already deployed function instead of deploying the package
    #[arg(long)]
    lambda_arn: Option<String>,

    /// Zipped bootstrap binary of the tool handler
    #[arg(long, conflicts_with = "lambda_arn")]
    lambda_zip: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    ensure_env_loaded();
    init_tracing("info");

    if let Err(err) = setup(args).await {
        error!(error = %err, "setup failed");
        match err.downcast_ref::<ProvisionError>() {
            Some(provision) => eprintln!("❌ {}", provision.user_message()),
            None => eprintln!("❌ {err}"),
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn setup(args: Args) -> Result<(), Box<dyn Error>> {
    let started = Instant::now();
    let region = DEFAULT_REGION;
    let suffix = random_suffix();
    let names = ResourceNames::for_suffix(&suffix);
    let config_path = PathBuf::from(config_file_name(&suffix));
    let source = LambdaSource::from_args(args.lambda_arn, args.lambda_zip);

    println!("🚀 Setting up AgentCore Gateway...");
    println!("Region: {region}");
    println!("Run suffix: {suffix}\n");

    let provisioner = GatewayProvisioner::from_region(region).await;

    println!("Step 1: Creating OAuth authorization server...");
    let authorizer = provisioner.create_oauth_authorizer(&names.authorizer).await?;
    println!("✓ Authorization server created: {}\n", names.authorizer);

    println!("Step 2: Creating IAM roles...");
    let gateway_role = provisioner.create_gateway_role(&names.gateway).await?;
    let function_role = if source.needs_role() {
        Some(provisioner.create_function_role(&names.target).await?)
    } else {
        None
    };
    println!(
        "⏳ Waiting {}s for IAM propagation...",
        IAM_PROPAGATION_DELAY.as_secs()
    );
    tokio::time::sleep(IAM_PROPAGATION_DELAY).await;
    println!("✓ IAM permissions configured\n");

    println!("Step 3: Creating Gateway...");
    let gateway = provisioner
        .create_mcp_gateway(&names.gateway, &gateway_role, &authorizer)
        .await?;
    println!("✓ Gateway created: {} (name: {})", gateway.gateway_url, names.gateway);
    let checks = provisioner
        .wait_until_ready(&gateway.gateway_id, ReadinessPolicy::default())
        .await?;
    info!(checks, "gateway ready");
    println!("✓ Gateway is READY\n");

    println!("Step 4: Adding Lambda target...");
    let lambda_arn = provisioner
        .ensure_target_function(&source, &names.target, function_role.as_deref())
        .await?;
    provisioner
        .create_lambda_target(&gateway.gateway_id, &names.target, &lambda_arn)
        .await?;
    println!("✓ Lambda target added: {}\n", names.target);

    let config = GatewayConfig {
        gateway_url: gateway.gateway_url,
        gateway_id: gateway.gateway_id,
        region,
        client_info: authorizer.client_info,
        names,
        suffix,
    };
    config.save_new(&config_path)?;

    println!("{}", "=".repeat(30));
    println!("✅ Gateway setup complete!");
    println!("Gateway URL: {}", config.gateway_url);
    println!("Gateway ID: {}", config.gateway_id);
    println!("\nConfiguration saved to: {}", config_path.display());
    println!("\nNext step: Run 'run-agent {}' to test your Gateway", config.suffix);
    println!("{}", "=".repeat(30));
    println!("\n⏱️ Total execution time: {}", format_elapsed(started.elapsed()));
    Ok(())
}
