use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{ContactMessage, DonationRecord, EWastePickupRequest, TechHubApplication};
use site_client::{
    config::load_settings, Backend, BackendUnavailablePolicy, BlogQuery, SiteApi, SiteClient,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sitectl", about = "Query and exercise the Maxsys site backends")]
struct Cli {
    #[arg(long, default_value = "site.toml")]
    config: PathBuf,
    /// Overrides the policy from settings: fallback-to-demo or raise.
    #[arg(long)]
    on_backend_unavailable: Option<BackendUnavailablePolicy>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Projects,
    Stewards,
    Posts {
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "category")]
        categories: Vec<u32>,
    },
    TechHubs,
    /// Check whether both backends answer.
    Probe,
    /// Submit a tech hub application read from a JSON file.
    Apply { payload: PathBuf },
    Pickup { payload: PathBuf },
    Contact { payload: PathBuf },
    Donate { payload: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(policy) = cli.on_backend_unavailable {
        settings.on_backend_unavailable = policy.to_string();
    }
    let config = settings.into_config().context("invalid site settings")?;
    info!(
        content = %config.content_base_url,
        transactional = %config.transactional_base_url,
        policy = %config.on_backend_unavailable,
        "using site backends"
    );

    let client = SiteClient::new(config);
    run(&client, cli.command).await
}

async fn run(api: &dyn SiteApi, command: Command) -> Result<()> {
    match command {
        Command::Projects => print_json(&api.fetch_projects().await?),
        Command::Stewards => print_json(&api.fetch_tech_stewards().await?),
        Command::Posts {
            per_page,
            search,
            categories,
        } => {
            let query = BlogQuery {
                per_page,
                search,
                categories,
            };
            print_json(&api.fetch_blog_posts(&query).await?)
        }
        Command::TechHubs => print_json(&api.fetch_tech_hubs().await?),
        Command::Probe => {
            for backend in [Backend::Content, Backend::Transactional] {
                let status = if api.probe(backend).await {
                    "available"
                } else {
                    "unavailable"
                };
                println!("{}: {status}", backend.as_str());
            }
            Ok(())
        }
        Command::Apply { payload } => {
            let application: TechHubApplication = read_payload(&payload)?;
            print_json(&api.submit_tech_hub_application(&application).await?)
        }
        Command::Pickup { payload } => {
            let pickup: EWastePickupRequest = read_payload(&payload)?;
            print_json(&api.schedule_ewaste_pickup(&pickup).await?)
        }
        Command::Contact { payload } => {
            let message: ContactMessage = read_payload(&payload)?;
            print_json(&api.submit_contact_form(&message).await?)
        }
        Command::Donate { payload } => {
            let donation: DonationRecord = read_payload(&payload)?;
            print_json(&api.process_donation(&donation).await?)
        }
    }
}

fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read payload '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("payload '{}' does not match the expected form", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
