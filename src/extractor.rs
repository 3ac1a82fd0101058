//! Ordered-fallback product extraction from raw storefront HTML.
//!
//! Real product pages vary wildly in markup, so every field is extracted by
//! walking a fixed priority list of strategies and taking the first that
//! yields a usable value: structured metadata (OpenGraph, Twitter Cards,
//! price meta tags) always wins over common e-commerce selectors, which in
//! turn win over free-text heuristics. A strategy that doesn't match simply
//! falls through; only a document that cannot be parsed at all is an error.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::models::ExtractedProduct;
use crate::text::normalize_whitespace;

/// Extraction failed before any field could be attempted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input could not be parsed into a document at all. The underlying
    /// parser recovers from nearly any malformed input, so callers should
    /// treat this as "skip this URL and move on".
    #[error("failed to parse HTML into a document")]
    Parse,
}

/// A selector list or currency-token table in the configuration is invalid.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("invalid currency token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Selector and token tables for the extractor.
///
/// Everything the heuristics key on is data here, so the tables can be
/// swapped per locale or target site without touching extraction logic.
/// `Default` carries the tables tuned for Egyptian air-conditioner
/// storefronts (WooCommerce-heavy, EGP pricing).
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Name sources, highest confidence first.
    pub name_selectors: Vec<String>,
    /// Description sources, metadata first, then short-description containers.
    pub description_selectors: Vec<String>,
    /// Image sources: social metadata, then gallery/product image containers.
    pub image_selectors: Vec<String>,
    /// Price meta tags (tier 1).
    pub price_meta_selectors: Vec<String>,
    /// Common price element selectors (tier 2), tried in order.
    pub price_selectors: Vec<String>,
    /// Currency words/abbreviations anchoring the body-text price search
    /// (tier 3).
    pub currency_tokens: Vec<String>,
    /// How many characters of visible body text the tier-3 search scans.
    pub body_scan_limit: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            name_selectors: vec![
                r#"meta[property="og:title"]"#.to_string(),
                r#"meta[name="twitter:title"]"#.to_string(),
                "title".to_string(),
                "h1".to_string(),
            ],
            description_selectors: vec![
                r#"meta[property="og:description"]"#.to_string(),
                r#"meta[name="twitter:description"]"#.to_string(),
                r#"meta[name="description"]"#.to_string(),
                ".product-short-description".to_string(),
                ".woocommerce-product-details__short-description".to_string(),
                ".description".to_string(),
                "#description".to_string(),
            ],
            image_selectors: vec![
                r#"meta[property="og:image"]"#.to_string(),
                r#"meta[name="twitter:image"]"#.to_string(),
                ".woocommerce-product-gallery__image img".to_string(),
                ".product-image img".to_string(),
                ".images img".to_string(),
                r#"img[itemprop="image"]"#.to_string(),
            ],
            price_meta_selectors: vec![
                r#"meta[property="product:price:amount"]"#.to_string(),
                r#"meta[itemprop="price"]"#.to_string(),
                r#"meta[name="price"]"#.to_string(),
            ],
            price_selectors: vec![
                // WooCommerce puts the active price under .price .amount
                ".price .amount".to_string(),
                ".product-price".to_string(),
                ".offer-price".to_string(),
                ".price".to_string(),
                r#"[itemprop="price"]"#.to_string(),
            ],
            currency_tokens: vec![
                "ج.م".to_string(),
                "L.E".to_string(),
                "EGP".to_string(),
                "جنيه".to_string(),
            ],
            body_scan_limit: 10_000,
        }
    }
}

/// Stateless product extractor: a pure function of `(html, source_url)` with
/// its selector/token tables compiled once at construction.
#[derive(Debug)]
pub struct Extractor {
    name: Vec<Selector>,
    description: Vec<Selector>,
    image: Vec<Selector>,
    price_meta: Vec<Selector>,
    price: Vec<Selector>,
    body: Selector,
    /// One-to-three digits, optionally grouped in exact thousands, optional
    /// decimal part. Exact grouping keeps phone numbers and SKUs from
    /// matching as prices.
    grouped_number: Regex,
    amount_then_token: Regex,
    token_then_amount: Regex,
    body_scan_limit: usize,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        let tokens = config
            .currency_tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let amount = r"(\d{1,3}(?:,\d{3})*(?:\.\d+)?)";

        Ok(Self {
            name: compile_all(&config.name_selectors)?,
            description: compile_all(&config.description_selectors)?,
            image: compile_all(&config.image_selectors)?,
            price_meta: compile_all(&config.price_meta_selectors)?,
            price: compile_all(&config.price_selectors)?,
            body: compile("body")?,
            grouped_number: Regex::new(r"\d{1,3}(?:[,\s]\d{3})*(?:\.\d+)?")?,
            amount_then_token: Regex::new(&format!(r"(?i){amount}\s*(?:{tokens})"))?,
            token_then_amount: Regex::new(&format!(r"(?i)(?:{tokens})\s*{amount}"))?,
            body_scan_limit: config.body_scan_limit,
        })
    }

    /// Extract a normalized product record from a page.
    ///
    /// Individual field failures degrade to the field's empty/zero default
    /// and are never propagated; `ExtractError::Parse` is the only fatal
    /// condition. An all-default record (`name == ""`) is the soft-failure
    /// signal batch callers count as skipped.
    pub fn extract(&self, html: &str, source_url: &str) -> Result<ExtractedProduct, ExtractError> {
        let document = Html::parse_document(html);
        let root = document
            .tree
            .root()
            .children()
            .find_map(ElementRef::wrap)
            .ok_or(ExtractError::Parse)?;

        let name = first_text(&document, &self.name).unwrap_or_default();
        let description = first_text(&document, &self.description)
            .map(|d| normalize_whitespace(&d))
            .unwrap_or_default();
        let image_url = self
            .image_candidate(&document)
            .map(|raw| resolve_image_url(&raw, source_url))
            .unwrap_or_default();
        let price = self.extract_price(&document, root);

        Ok(ExtractedProduct {
            name,
            description,
            image_url,
            price,
        })
    }

    /// Raw inner HTML of the first short-description container, for callers
    /// that parse feature bullets out of the markup itself. Meta-tag sources
    /// carry no markup and are not considered.
    pub fn description_markup(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        for selector in &self.description {
            let Some(element) = document.select(selector).next() else {
                continue;
            };
            if element.value().name() == "meta" {
                continue;
            }
            let markup = element.inner_html();
            if !markup.trim().is_empty() {
                return Some(markup);
            }
        }
        None
    }

    /// Three-tier price fallback; each tier runs only if the previous one
    /// yielded no valid number.
    fn extract_price(&self, document: &Html, root: ElementRef<'_>) -> f64 {
        self.price_from_meta(document)
            .or_else(|| self.price_from_selectors(document))
            .or_else(|| {
                let body = document
                    .select(&self.body)
                    .next()
                    .unwrap_or(root);
                let text: String = body.text().collect();
                self.price_from_body(&text)
            })
            .unwrap_or(0.0)
    }

    /// Tier 1: structured price meta tags. The first tag with non-empty
    /// content decides; unparseable content falls through to tier 2.
    fn price_from_meta(&self, document: &Html) -> Option<f64> {
        let raw = first_text(document, &self.price_meta)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Tier 2: common e-commerce price elements. For each selector, only the
    /// first matching element is inspected; the first grouped number found in
    /// its text wins if it parses to a positive finite value.
    fn price_from_selectors(&self, document: &Html) -> Option<f64> {
        for selector in &self.price {
            let Some(element) = document.select(selector).next() else {
                continue;
            };
            let text: String = element.text().collect();
            if let Some(m) = self.grouped_number.find(&text) {
                let cleaned: String = m
                    .as_str()
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != ',')
                    .collect();
                if let Ok(value) = cleaned.parse::<f64>() {
                    if value.is_finite() && value > 0.0 {
                        return Some(value);
                    }
                }
            }
        }
        None
    }

    /// Tier 3: last resort. Search the head of the visible body text for a
    /// number adjacent to a currency token, in either order.
    fn price_from_body(&self, body_text: &str) -> Option<f64> {
        let snippet: String = body_text.chars().take(self.body_scan_limit).collect();
        let captures = self
            .amount_then_token
            .captures(&snippet)
            .or_else(|| self.token_then_amount.captures(&snippet))?;
        captures[1].replace(',', "").parse::<f64>().ok()
    }

    /// Image source walk: meta tags yield their `content` attribute, image
    /// elements yield `src` falling back to `data-src` (lazy loading).
    fn image_candidate(&self, document: &Html) -> Option<String> {
        for selector in &self.image {
            let Some(element) = document.select(selector).next() else {
                continue;
            };
            let raw = if element.value().name() == "meta" {
                element.value().attr("content")
            } else {
                element
                    .value()
                    .attr("src")
                    .or_else(|| element.value().attr("data-src"))
            };
            if let Some(candidate) = raw.map(str::trim).filter(|s| !s.is_empty()) {
                return Some(candidate.to_string());
            }
        }
        None
    }
}

/// Resolve a relative image path against the source page. Absolute URLs pass
/// through unchanged; a resolution failure keeps the raw value and is only
/// logged, never raised.
fn resolve_image_url(raw: &str, source_url: &str) -> String {
    if Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    match Url::parse(source_url).and_then(|base| base.join(raw)) {
        Ok(absolute) => absolute.to_string(),
        Err(error) => {
            warn!(image = raw, source = source_url, %error, "failed to resolve relative image URL");
            raw.to_string()
        }
    }
}

/// First non-empty text among the selectors, in order. Meta elements yield
/// their trimmed `content` attribute, anything else its trimmed text; an
/// empty-after-trim candidate counts as no match and falls through.
fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    for selector in selectors {
        let Some(element) = document.select(selector).next() else {
            continue;
        };
        if element.value().name() == "meta" {
            if let Some(content) = element.value().attr("content") {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
            continue;
        }
        let text: String = element.text().collect();
        let text = text.trim();
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    None
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::Selector(selector.to_string()))
}

fn compile_all(selectors: &[String]) -> Result<Vec<Selector>, ConfigError> {
    selectors.iter().map(|s| compile(s)).collect()
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default()).expect("default configuration is valid")
    }
}
