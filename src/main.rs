use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use storescrape::cli::{Cli, Commands};
use storescrape::{
    enumerate_product_links, logging, BatchRunner, ExtractError, Extractor, FetchError,
    HttpClient, LinkConfig, ProductAttributes, ProductRecord,
};

#[derive(Debug, Error)]
enum MainError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    logging::init();

    let cli = Cli::parse();
    let client = HttpClient::new(&cli.user_agent, cli.timeout);
    let extractor = Extractor::default();

    match cli.command {
        Commands::Product { url } => {
            let html = client.fetch(&url).await?;
            let product = extractor.extract(&html, &url)?;
            // Feature bullets live in the description markup (<br>/<li>
            // structure), which the normalized record no longer carries.
            let raw_description = extractor
                .description_markup(&html)
                .unwrap_or_else(|| product.description.clone());
            let attributes = ProductAttributes::derive(&product.name, &raw_description);
            let record = ProductRecord {
                product,
                attributes,
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Category { url } => {
            let html = client.fetch(&url).await?;
            let links = enumerate_product_links(&html, &url, &LinkConfig::default());
            tracing::info!(count = links.len(), "found candidate product links");
            for link in links {
                println!("{}", link);
            }
        }
        Commands::Batch { urls, delay_ms } => {
            let runner = BatchRunner::new(client, extractor, Duration::from_millis(delay_ms));
            let outcome = runner.run(&urls).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
