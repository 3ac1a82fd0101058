use serde::{Deserialize, Serialize};

/// Normalized product record produced by the extractor.
///
/// Fields degrade to their empty/zero defaults when no extraction strategy
/// matches; an empty `name` is the soft-failure signal batch callers check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractedProduct {
    /// Product name, trimmed. Empty when no title-bearing element was found.
    pub name: String,

    /// Short description with HTML stripped and whitespace collapsed.
    pub description: String,

    /// Absolute image URL when resolvable, otherwise the raw value as found.
    pub image_url: String,

    /// Non-negative price; `0` when no strategy yielded a confident number.
    pub price: f64,
}

impl ExtractedProduct {
    /// A record with no name is treated as a failed extraction by callers.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Secondary attributes derived from an extracted product's text.
///
/// These come from pattern matching on the name and raw description and are
/// best-effort: any field may be `None`/empty on pages that don't mention it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductAttributes {
    /// Cooling capacity in horsepower, e.g. "1.5 حصان".
    pub capacity: Option<String>,

    /// "بارد ساخن" (cool/heat) or "بارد فقط" (cool only).
    pub cooling_type: Option<String>,

    /// Manufacturer model number, uppercased.
    pub model: Option<String>,

    /// Feature bullet points pulled from the description markup (max 6).
    pub features: Vec<String>,
}

/// Full record emitted by the CLI: the extracted product plus derived
/// attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(flatten)]
    pub product: ExtractedProduct,
    pub attributes: ProductAttributes,
}
