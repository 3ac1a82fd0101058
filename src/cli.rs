use clap::{Parser, Subcommand};

use crate::network::DEFAULT_USER_AGENT;

/// Command line surface for one-off scrapes and sequential batches.
#[derive(Parser, Debug)]
#[command(name = "storescrape")]
#[command(about = "Extract product data and product links from storefront pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_USER_AGENT,
        help = "User agent string for requests"
    )]
    pub user_agent: String,

    #[arg(
        long,
        global = true,
        default_value = "20",
        help = "Request timeout in seconds"
    )]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a single product page and print the record as JSON.
    Product {
        #[arg(help = "Product page URL")]
        url: String,
    },

    /// List candidate product links found on a category page.
    Category {
        #[arg(help = "Category page URL")]
        url: String,
    },

    /// Extract many product pages sequentially and print records + summary.
    Batch {
        #[arg(required = true, help = "Product page URLs, in order")]
        urls: Vec<String>,

        #[arg(
            long,
            default_value = "1000",
            help = "Delay between requests in milliseconds (be polite to the source site)"
        )]
        delay_ms: u64,
    },
}
