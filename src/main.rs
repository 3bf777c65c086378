use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use credpoll::client::RestClient;
use credpoll::credential::{AddCardRequest, Card, CredentialService, issued_mobile_credential};
use credpoll::poll::{CancelSignal, cancel_pair};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", env!("CARGO_PKG_NAME")));

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Cancel signal that fires on Ctrl-C
fn ctrl_c_signal() -> CancelSignal {
    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, cancelling");
            handle.cancel();
        }
    });
    signal
}

fn card_type_href(client: &RestClient, flag: Option<&str>, config: &Config) -> Result<String> {
    let href = flag.unwrap_or(config.credential.card_type_href.as_str());
    if href.is_empty() {
        return Err(eyre!("No card type given; pass --card-type or set credential.card_type_href"));
    }
    // Cards come back with absolute type hrefs
    Ok(client.resolve(href)?.to_string())
}

fn print_card(card: &Card) {
    let number = card.number.as_deref().unwrap_or("-");
    let status = card.invitation_status().unwrap_or("-");
    let invitation = card.invitation_href().unwrap_or("-");
    let href = card.href.as_deref().unwrap_or("-");
    println!("  {} {} {}", number.bold(), status.cyan(), invitation);
    println!("    {}", href.dimmed());
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let client = Arc::new(RestClient::new(&config.api.rest_config()).context("Failed to build REST client")?);
    let policy = config.poll.policy()?;
    let service = CredentialService::new(Arc::clone(&client), &config.credential.items_pointer, policy);

    match &cli.command {
        Commands::Issue {
            cardholder,
            email,
            mobile,
            single_factor_only,
            number,
            card_type,
        } => {
            let mut request = AddCardRequest::new(card_type_href(&client, card_type.as_deref(), config)?)
                .single_factor_only(*single_factor_only);
            if let Some(email) = email {
                request = request.with_email(email);
            }
            if let Some(mobile) = mobile {
                request = request.with_mobile(mobile);
            }
            if let Some(number) = number {
                request = request.with_number(number);
            }
            handle_issue_command(&service, cardholder, &request.correlated()).await
        }
        Commands::Watch {
            cardholder,
            number,
            card_type,
        } => {
            let type_href = card_type_href(&client, card_type.as_deref(), config)?;
            handle_watch_command(&service, cardholder, type_href, number.clone()).await
        }
        Commands::List { cardholder } => handle_list_command(&service, cardholder).await,
        Commands::Revoke { card } => handle_revoke_command(&service, card).await,
    }
}

async fn handle_issue_command(service: &CredentialService, cardholder: &str, request: &AddCardRequest) -> Result<()> {
    info!("Issuing mobile credential for {}", cardholder);
    println!("{} {}", "Issuing:".green(), cardholder);

    let policy = service.policy();
    println!(
        "  waiting up to {:?} ({} attempts)",
        policy.ceiling(),
        policy.max_attempts()
    );

    let issued = service
        .issue(cardholder, request, &ctrl_c_signal())
        .await
        .context("Credential was not issued")?;

    println!(
        "{} after {} attempts ({})",
        "Issued".green().bold(),
        issued.completion.attempts,
        issued.operation.id
    );
    print_card(&issued.completion.item);
    Ok(())
}

async fn handle_watch_command(
    service: &CredentialService,
    cardholder: &str,
    card_type_href: String,
    number: Option<String>,
) -> Result<()> {
    info!("Watching {} for issued credential", cardholder);
    println!("{} {}", "Watching:".cyan(), cardholder);

    let predicate = issued_mobile_credential(card_type_href, number);
    let card = service
        .watch(cardholder, &predicate, &ctrl_c_signal())
        .await
        .context("Credential was not issued")?;

    println!("{}", "Issued".green().bold());
    print_card(&card);
    Ok(())
}

async fn handle_list_command(service: &CredentialService, cardholder: &str) -> Result<()> {
    info!("Listing mobile credentials for {}", cardholder);
    let cards = service.list(cardholder).await.context("Failed to list credentials")?;

    if cards.is_empty() {
        println!("{}", "No mobile credentials".yellow());
        return Ok(());
    }

    println!("{} {}", "Mobile credentials:".green(), cards.len());
    for card in &cards {
        print_card(card);
    }
    Ok(())
}

async fn handle_revoke_command(service: &CredentialService, card: &str) -> Result<()> {
    info!("Revoking credential: {}", card);
    service.revoke(card).await.context("Failed to revoke credential")?;
    println!("{} {}", "Revoked:".red(), card);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(max_attempts) = cli.max_attempts {
        config.poll.max_attempts = max_attempts;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll.interval_ms = interval_ms;
    }

    let level = if cli.is_verbose() {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
