//! Sequential batch extraction over a list of product URLs.
//!
//! One URL at a time with a fixed inter-request delay, so the source site is
//! never hammered. Per-URL failures are logged and counted, never fatal: a
//! fetch or parse error counts as failed, an all-default record counts as
//! skipped, and repeated product names are dropped as duplicates. The run
//! always ends with a summary.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::extractor::Extractor;
use crate::models::ExtractedProduct;
use crate::network::HttpClient;

/// Counters reported at the end of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Records with usable data.
    pub extracted: usize,
    /// Records dropped because a product with the same name was already seen.
    pub duplicates: usize,
    /// Pages that parsed but yielded an all-default record.
    pub skipped: usize,
    /// Fetch or parse failures.
    pub failed: usize,
}

/// Products plus counters from one batch run.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub products: Vec<ExtractedProduct>,
    pub summary: BatchSummary,
}

/// Drives the extractor over many URLs sequentially.
pub struct BatchRunner {
    client: HttpClient,
    extractor: Extractor,
    delay: Duration,
}

impl BatchRunner {
    pub fn new(client: HttpClient, extractor: Extractor, delay: Duration) -> Self {
        Self {
            client,
            extractor,
            delay,
        }
    }

    /// Fetch and extract every URL in order, sleeping `delay` between
    /// requests. Never aborts mid-batch.
    pub async fn run(&self, urls: &[String]) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            products: Vec::new(),
            summary: BatchSummary::default(),
        };
        let mut seen_names = HashSet::new();

        for (index, url) in urls.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let html = match self.client.fetch(url).await {
                Ok(html) => html,
                Err(error) => {
                    warn!(%url, %error, "fetch failed");
                    outcome.summary.failed += 1;
                    continue;
                }
            };

            self.ingest(url, &html, &mut seen_names, &mut outcome);
        }

        info!(
            extracted = outcome.summary.extracted,
            duplicates = outcome.summary.duplicates,
            skipped = outcome.summary.skipped,
            failed = outcome.summary.failed,
            "batch complete"
        );
        outcome
    }

    /// Classify one fetched page into the outcome counters.
    fn ingest(
        &self,
        url: &str,
        html: &str,
        seen_names: &mut HashSet<String>,
        outcome: &mut BatchOutcome,
    ) {
        let product = match self.extractor.extract(html, url) {
            Ok(product) => product,
            Err(error) => {
                warn!(%url, %error, "extraction failed");
                outcome.summary.failed += 1;
                return;
            }
        };

        if product.is_empty() {
            info!(%url, "no product data found, skipping");
            outcome.summary.skipped += 1;
            return;
        }

        if !seen_names.insert(product.name.clone()) {
            info!(%url, name = %product.name, "duplicate product name, dropping");
            outcome.summary.duplicates += 1;
            return;
        }

        info!(%url, name = %product.name, price = product.price, "extracted product");
        outcome.summary.extracted += 1;
        outcome.products.push(product);
    }
}
