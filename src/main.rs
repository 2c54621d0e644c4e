//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ezid_probe` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ezid_probe::anvl::{decode, encode_args, FsFileSource, MetadataRecord, ResponseEnvelope};
use ezid_probe::config::{Cli, Command, DecodeArgs, POLL_INTERVAL};
use ezid_probe::datacite::verify_doi;
use ezid_probe::initialization::{init_client, init_logger_with};
use ezid_probe::search::SearchQuery;
use ezid_probe::EzidClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load EZID_USER / EZID_PASS from .env if present, current dir first,
    // then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("ezid-probe error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.client_config();
    match cli.command {
        Command::Encode { args } => {
            let document = encode_args(&args, &FsFileSource).context("Failed to encode metadata")?;
            println!("{document}");
        }
        Command::Decode { file, output } => {
            let document = read_input(file.as_deref())?;
            let envelope = decode(Some(document.as_str()), output.decode_options());
            print_envelope(&envelope, &output)?;
        }
        Command::Status => {
            let client = EzidClient::new(&config)?;
            let envelope = client.server_status().await?;
            println!("{}: {}", envelope.status, envelope.status_message);
        }
        Command::View { identifier, output } => {
            let client = EzidClient::new(&config)?;
            let envelope = client
                .view(&identifier, output.decode_options())
                .await
                .with_context(|| format!("Failed to view {identifier}"))?;
            print_envelope(&envelope, &output)?;
        }
        Command::Mint { shoulder, args } => {
            let metadata = MetadataRecord::from_args(&args)?;
            let client = EzidClient::new(&config)?;
            let minted = client
                .mint(&shoulder, &metadata, &FsFileSource)
                .await
                .with_context(|| format!("Failed to mint on {shoulder}"))?;
            match &minted.shadow_ark {
                Some(ark) => println!("{} | {}", minted.identifier, ark),
                None => println!("{}", minted.identifier),
            }
        }
        Command::Search(args) => {
            let client = EzidClient::new(&config)?;
            let query = SearchQuery::from(args);
            let response = client.search(&query).await?;
            info!("Searched {} in {:.2}s", response.url, response.elapsed.as_secs_f64());
            match response.results.total {
                Some(total) => println!("{total} results"),
                None => println!("No result count on page"),
            }
            for row in &response.results.records {
                println!("{}", row.join("\t"));
            }
        }
        Command::Datacite {
            doi,
            datacite_url,
            max_wait_seconds,
        } => {
            let http = init_client(&config)?;
            let record = verify_doi(
                &http,
                &datacite_url,
                &doi,
                POLL_INTERVAL,
                Duration::from_secs(max_wait_seconds),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&record.document)?);
        }
    }
    Ok(())
}

/// Reads the whole input, from stdin when `path` is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut document = String::new();
            std::io::stdin()
                .read_to_string(&mut document)
                .context("Failed to read stdin")?;
            Ok(document)
        }
    }
}

fn print_envelope(envelope: &ResponseEnvelope, output: &DecodeArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&envelope.to_json())?);
        return Ok(());
    }
    println!("{}: {}", envelope.status, envelope.status_message);
    for (key, value) in envelope.fields() {
        println!("{key}: {value}");
    }
    if !envelope.body.is_empty() {
        println!();
        println!("{}", envelope.body);
    }
    Ok(())
}
