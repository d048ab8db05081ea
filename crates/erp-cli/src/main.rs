//! erp-cli
//!
//! Command-line front end for the ERP client SDK.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erp_client::ErpClient;
use erp_core::config::ClientConfig;
use erp_queries::QueryOptions;

use cli::{Cli, Commands, Entity};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let connect = || -> Result<ErpClient> {
        let config = load_config(&cli)?;
        tracing::info!(base_url = %config.base_url, "Using ERP API");
        Ok(ErpClient::new(&config)?)
    };

    let output = match &cli.command {
        Commands::QueryString(query) => {
            println!("{}", query.to_options()?.to_query_string());
            return Ok(());
        }
        Commands::List { entity, query } => {
            let options = query.to_options()?;
            let client = connect()?;
            match entity {
                Entity::SalesOrders => to_json(client.sales_orders().list(&options).await?)?,
                Entity::Firmdocs => to_json(client.firmdocs().list(&options).await?)?,
            }
        }
        Commands::Get { entity, id, expand } => {
            let mut options = QueryOptions::new();
            if let Some(expand) = expand {
                options = options.expand(expand.as_str());
            }
            let client = connect()?;
            match entity {
                Entity::SalesOrders => to_json(client.sales_orders().get(*id, &options).await?)?,
                Entity::Firmdocs => to_json(client.firmdocs().get(*id, &options).await?)?,
            }
        }
        Commands::Search {
            entity,
            field,
            prefix,
            query,
        } => {
            let options = query.to_options()?;
            let client = connect()?;
            match entity {
                Entity::SalesOrders => {
                    to_json(client.sales_orders().search_by(field, prefix.as_str(), &options).await?)?
                }
                Entity::Firmdocs => to_json(client.firmdocs().search_by(field, prefix.as_str(), &options).await?)?,
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    if let Some(path) = &cli.config {
        let mut config = ClientConfig::from_file(path).with_context(|| format!("failed to load {}", path))?;
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
            config.validate()?;
        }
        return Ok(config);
    }

    let config = ClientConfig::from_vars(|key| match (key, &cli.base_url) {
        ("ERP_API_URL", Some(base_url)) => Some(base_url.clone()),
        _ => std::env::var(key).ok(),
    })
    .context("failed to read ERP_API_* settings")?;
    Ok(config)
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
