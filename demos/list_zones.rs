//! List the zones an account may download.
//!
//! Run with: cargo run --example list_zones

use czds_rs::CzdsClient;

#[tokio::main]
async fn main() -> czds_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let username =
        std::env::var("CZDS_USERNAME").expect("CZDS_USERNAME environment variable required");
    let password =
        std::env::var("CZDS_PASSWORD").expect("CZDS_PASSWORD environment variable required");

    println!("Authenticating with ICANN...");
    let client = CzdsClient::login(&username, &password).await?;
    println!("Successfully authenticated!");

    let list = client.zones().list().await?;
    println!("\nEntitled to {} zone(s):", list.len());

    for (link, zone) in list.iter().zip(list.zones()) {
        println!("  - {:<20} {}", zone, link);
    }

    Ok(())
}
