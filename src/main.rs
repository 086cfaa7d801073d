use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use provision_cli::api::StoreClient;
use provision_cli::config::Config;
use provision_cli::provision;

#[derive(Parser)]
#[command(name = "provision-cli")]
#[command(about = "Provisions the media-provision schema into a remote object-model store")]
struct Cli {
    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Object-model store base URL, overriding the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Bearer token for the store API, overriding the configuration file
    #[arg(long)]
    token: Option<String>,

    /// Store module holding the definitions, overriding the configuration file
    #[arg(long)]
    module: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(token) = cli.token {
        config.api_token = token;
    }
    if let Some(module) = cli.module {
        config.module = module;
    }
    config.validate()?;

    info!(
        "Provisioning schema in module '{}' at {}",
        config.module, config.host
    );

    let store = StoreClient::new(config);
    let outcome = match provision::run(&store).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Provisioning run failed: {:#}", err);
            std::process::exit(1);
        }
    };

    println!("Reconciled section definition '{}'", outcome.provision_info.name);
    println!("Reconciled section definition '{}'", outcome.instance_links.name);
    println!("Reconciled behavior definition '{}'", outcome.behavior.name);
    println!("Reconciled object definition '{}'", outcome.definition.name);

    Ok(())
}
