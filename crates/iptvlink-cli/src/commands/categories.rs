use anyhow::{Context, Result};
use iptvlink_core::{PortalClient, PortalIdentity, format_category_table};

pub async fn run(portal_url: &str, mac: Option<String>) -> Result<()> {
    let mut identity = PortalIdentity::default();
    if let Some(mac) = mac {
        identity.mac = mac;
    }

    let client = PortalClient::with_identity(portal_url, identity)?;

    println!("Performing Handshake...");
    let token = client.handshake().await.context("handshake failed")?;
    println!("Handshake Success! Token: {}", token);

    println!("Fetching Profile (Auth Confirmation)...");
    if let Err(e) = client.get_profile(&token).await {
        tracing::warn!(error = %e, "profile request failed");
    }

    println!("\nFetching Categories...");
    let categories = client
        .get_categories(&token)
        .await
        .context("error fetching categories")?;

    println!("Found {} categories.", categories.len());
    print!("{}", format_category_table(&categories));

    Ok(())
}
