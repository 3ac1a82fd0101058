pub mod attributes;
pub mod cli;
pub mod extractor;
pub mod links;
pub mod logging;
pub mod models;
pub mod network;
pub mod runner;
pub mod text;

// Re-export main types for library usage
pub use extractor::{ConfigError, ExtractError, Extractor, ExtractorConfig};
pub use links::{enumerate_product_links, LinkConfig};
pub use models::{ExtractedProduct, ProductAttributes, ProductRecord};
pub use network::{FetchError, HttpClient};
pub use runner::{BatchOutcome, BatchRunner, BatchSummary};
