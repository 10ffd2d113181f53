use anyhow::Context;
use clap::Parser;

use campus_catalog::catalog::query::{SearchParams, StatsParams};
use campus_catalog::utils::logger;
use campus_catalog::{CampusCatalogClient, ClientConfig};

#[derive(Debug, Parser)]
#[command(name = "smoke")]
#[command(about = "Exercises every campus-catalog endpoint against a running server")]
struct SmokeArgs {
    #[arg(long, default_value = "http://localhost:3000")]
    base_url: String,

    #[arg(long, default_value = "CA")]
    state: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SmokeArgs::parse();
    logger::init_smoke_logger(args.verbose);

    println!("🚀 Smoke-testing campus-catalog at {}", args.base_url);

    let client = CampusCatalogClient::new(ClientConfig {
        base_url: args.base_url.clone(),
        ..Default::default()
    })
    .context("building client")?;

    let health = client.health().await.context("health check")?;
    println!(
        "✅ Health: {}",
        health["status"].as_str().unwrap_or("unknown")
    );

    let capabilities = client.capabilities().await.context("capability description")?;
    let advertised = capabilities["endpoints"]
        .as_array()
        .map(|endpoints| endpoints.len())
        .unwrap_or(0);
    println!("✅ Capabilities: {} endpoints advertised", advertised);

    let params = SearchParams {
        state: args.state.clone(),
        limit: 5,
        ..Default::default()
    };
    let search = client.search(&params).await.context("search")?;
    println!(
        "📊 Search: {} universities in {} ({} returned)",
        search.metadata.total,
        args.state,
        search.data.results.len()
    );

    match search.data.results.first() {
        Some(record) => {
            if let Some(name) = record.get("name").and_then(|v| v.as_str()) {
                let by_name = client
                    .university_by_name(name)
                    .await
                    .context("lookup by name")?;
                println!(
                    "✅ Lookup by name: found '{}'",
                    by_name
                        .data
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or(name)
                );
            }

            // objectid arrives as a string in this dataset, but a numeric
            // id still works as a path segment.
            let id = record.get("objectid").map(|value| match value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            });
            if let Some(id) = id {
                client
                    .university_by_id(&id)
                    .await
                    .context("lookup by id")?;
                println!("✅ Lookup by id: objectid {} resolved", id);
            }
        }
        None => println!("⚠️ Search returned no rows, skipping lookups"),
    }

    let fields = client.fields().await.context("field discovery")?;
    println!("✅ Fields: {} discovered", fields.data.len());
    if args.verbose {
        for field in &fields.data {
            println!("  - {} ({})", field.name, field.field_type);
        }
    }

    let stats = client
        .stats(&StatsParams {
            field: "objectid".to_string(),
            aggregation: "count".to_string(),
            group_by: Some("state".to_string()),
            filter: None,
        })
        .await
        .context("statistics")?;
    println!("📊 Stats: count by state returned {} rows", stats.data.len());

    let oversized = SearchParams {
        limit: 500,
        ..Default::default()
    };
    match client.search(&oversized).await {
        Err(e) => println!("✅ Over-limit search rejected: {}", e),
        Ok(_) => anyhow::bail!("over-limit search was accepted"),
    }

    println!("🎉 All endpoints answered as expected");
    Ok(())
}
