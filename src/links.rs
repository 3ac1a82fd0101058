//! Category-page link enumeration: the smaller sibling of the product
//! extractor, built on the same ordered-heuristic-with-exclusion-list idea.
//!
//! An anchor is a product-link candidate when its path matches a known
//! product-page pattern or the anchor sits inside a known product-card
//! container; a denylist of path fragments and image extensions then vetoes
//! false positives. The exclusion list always wins.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

/// Path patterns and container classes driving link discovery.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Path fragments marking a product page, e.g. `/product/`.
    pub product_path_patterns: Vec<String>,
    /// Class names of product-card containers; an anchor anywhere inside one
    /// counts as a product link even without a matching path.
    pub card_container_classes: Vec<String>,
    /// Path fragments that veto a candidate (cart, checkout, account pages).
    pub excluded_path_fragments: Vec<String>,
    /// File extensions that veto a candidate (direct image links).
    pub excluded_extensions: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            product_path_patterns: vec![
                "/product/".to_string(),
                "/products/".to_string(),
                "/item/".to_string(),
                "/p/".to_string(),
            ],
            card_container_classes: vec![
                "product".to_string(),
                "product-card".to_string(),
                "product_item".to_string(),
            ],
            excluded_path_fragments: vec![
                "/category/".to_string(),
                "/cart".to_string(),
                "/checkout".to_string(),
                "/account".to_string(),
                "/login".to_string(),
            ],
            excluded_extensions: vec![".jpg".to_string(), ".png".to_string()],
        }
    }
}

/// Collect candidate product-page URLs from a category page.
///
/// Relative hrefs are resolved against the base URL's origin, results are
/// restricted to http(s), deduplicated, and returned in first-seen order.
/// An unparseable base URL yields no links (there is nothing to resolve
/// against) and is logged.
pub fn enumerate_product_links(html: &str, base_url: &str, config: &LinkConfig) -> Vec<String> {
    let origin = match Url::parse(base_url)
        .map(|base| base.origin().ascii_serialization())
        .and_then(|origin| Url::parse(&origin))
    {
        Ok(origin) => origin,
        Err(error) => {
            warn!(base = base_url, %error, "invalid base URL for link enumeration");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("anchor selector is valid");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let resolved = match Url::parse(href) {
            Ok(absolute) => absolute,
            Err(_) => match origin.join(href) {
                Ok(resolved) => resolved,
                Err(_) => continue,
            },
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        let path = resolved.path();
        let looks_like_product = config
            .product_path_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
            || inside_card_container(anchor, &config.card_container_classes);
        if !looks_like_product {
            continue;
        }

        // Exclusion wins even when a product pattern matched.
        if config
            .excluded_path_fragments
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
            || config
                .excluded_extensions
                .iter()
                .any(|ext| path.ends_with(ext.as_str()))
        {
            continue;
        }

        let url = resolved.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

/// True when the anchor or any of its ancestors carries one of the given
/// class names.
fn inside_card_container(anchor: ElementRef<'_>, classes: &[String]) -> bool {
    std::iter::once(anchor)
        .chain(anchor.ancestors().filter_map(ElementRef::wrap))
        .any(|element| {
            classes
                .iter()
                .any(|class| element.value().classes().any(|c| c == class))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example.com/category/split-ac";

    fn enumerate(html: &str) -> Vec<String> {
        enumerate_product_links(html, BASE, &LinkConfig::default())
    }

    #[test]
    fn test_product_path_patterns_match() {
        let html = r#"
            <html><body>
                <a href="/product/sharp-1-5hp/">Sharp</a>
                <a href="https://shop.example.com/products/carrier-optimax">Carrier</a>
                <a href="/item/123">Item</a>
                <a href="/p/456">Short</a>
                <a href="/about-us">About</a>
            </body></html>
        "#;
        assert_eq!(
            enumerate(html),
            vec![
                "https://shop.example.com/product/sharp-1-5hp/",
                "https://shop.example.com/products/carrier-optimax",
                "https://shop.example.com/item/123",
                "https://shop.example.com/p/456",
            ]
        );
    }

    #[test]
    fn test_card_container_includes_non_product_path() {
        let html = r#"
            <html><body>
                <li class="product"><a href="/sharp-ac-18000-btu">Card link</a></li>
                <a href="/sharp-ac-24000-btu">Bare link</a>
            </body></html>
        "#;
        assert_eq!(
            enumerate(html),
            vec!["https://shop.example.com/sharp-ac-18000-btu"]
        );
    }

    #[test]
    fn test_denylist_beats_product_pattern() {
        let html = r#"
            <html><body>
                <a href="/product/category/all">Category</a>
                <a href="/product/add-to-cart">Cart</a>
                <a href="/products/checkout">Checkout</a>
                <a href="/product/my-account">Account</a>
                <a href="/product/login">Login</a>
                <a href="/product/real-ac/">Real</a>
            </body></html>
        "#;
        assert_eq!(enumerate(html), vec!["https://shop.example.com/product/real-ac/"]);
    }

    #[test]
    fn test_image_extensions_excluded() {
        let html = r#"
            <html><body>
                <a href="/product/ac1.jpg">Photo</a>
                <a href="/product/ac2.png">Photo</a>
                <a href="/product/ac3/">Page</a>
            </body></html>
        "#;
        assert_eq!(enumerate(html), vec!["https://shop.example.com/product/ac3/"]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let html = r#"
            <html><body>
                <a href="/product/ac1/">First</a>
                <a href="/product/ac2/">Second</a>
                <a href="/product/ac1/">First again</a>
            </body></html>
        "#;
        assert_eq!(
            enumerate(html),
            vec![
                "https://shop.example.com/product/ac1/",
                "https://shop.example.com/product/ac2/",
            ]
        );
    }

    #[test]
    fn test_relative_links_resolve_against_origin() {
        let html = r#"<html><body><a href="product/ac1/">Relative</a></body></html>"#;
        // Resolution is against the origin, not the category page path.
        assert_eq!(enumerate(html), vec!["https://shop.example.com/product/ac1/"]);
    }

    #[test]
    fn test_non_http_schemes_skipped() {
        let html = r#"
            <html><body>
                <a href="mailto:sales@example.com">Mail</a>
                <a href="javascript:void(0)">JS</a>
                <a href="/product/ac1/">Page</a>
            </body></html>
        "#;
        assert_eq!(enumerate(html), vec!["https://shop.example.com/product/ac1/"]);
    }

    #[test]
    fn test_invalid_base_url_yields_nothing() {
        let html = r#"<html><body><a href="/product/ac1/">Page</a></body></html>"#;
        assert!(enumerate_product_links(html, "not a url", &LinkConfig::default()).is_empty());
    }

    #[test]
    fn test_external_product_links_kept() {
        let html = r#"
            <html><body>
                <a href="https://other.example.net/product/ac9/">External</a>
            </body></html>
        "#;
        assert_eq!(enumerate(html), vec!["https://other.example.net/product/ac9/"]);
    }
}
