//! Download every entitled zone into a directory.
//!
//! The output directory defaults to `./zones` and can be set with
//! `CZDS_OUTPUT_DIR`. `CZDS_CONCURRENCY` limits parallel downloads.
//!
//! Run with: cargo run --example download_zones

use std::path::PathBuf;

use czds_rs::{ClientConfig, CzdsClient, Session};

#[tokio::main]
async fn main() -> czds_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let username =
        std::env::var("CZDS_USERNAME").expect("CZDS_USERNAME environment variable required");
    let password =
        std::env::var("CZDS_PASSWORD").expect("CZDS_PASSWORD environment variable required");
    let dir = std::env::var("CZDS_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("zones"));
    let concurrency = std::env::var("CZDS_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(czds_rs::download::DEFAULT_CONCURRENCY);

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| czds_rs::Error::Io {
            path: dir.clone(),
            source: e,
        })?;

    let config = ClientConfig::default().with_concurrency(concurrency)?;
    let client = CzdsClient::with_session(Session::new(username, password), config)?;
    client.refresh_session().await?;
    println!("Successfully authenticated!");

    let zones = client.zones().list().await?.zones();
    println!("Downloading {} zone(s) into {}", zones.len(), dir.display());

    let report = client.zones().download_all(&zones, &dir).await;

    for (zone, path) in report.successes() {
        println!("  ok     {:<20} {}", zone, path.display());
    }
    for (zone, error) in report.failures() {
        println!("  failed {:<20} {}", zone, error);
    }

    println!(
        "\n{} of {} zone(s) saved",
        report.completed(),
        report.total()
    );
    Ok(())
}
