//! Listing record as returned by the listings search API.
//!
//! The API is the source of truth for these fields; nothing here validates or
//! normalizes them beyond what the views need for display.

use serde::{Deserialize, Deserializer, Serialize};

/// One property-for-sale record.
///
/// Only `title`, `price_formatted` and `img_url` are relied on by the result
/// list. The remaining fields are optional and shown by the detail view when
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing headline, e.g. "Flat for sale, Camden Road".
    #[serde(default)]
    pub title: String,

    /// Human-formatted price, e.g. "£350,000 GBP".
    #[serde(default)]
    pub price_formatted: String,

    /// Full-size image URL.
    #[serde(default)]
    pub img_url: String,

    /// Thumbnail image URL.
    #[serde(default)]
    pub thumb_url: Option<String>,

    /// Stable identifier, when the API supplies one.
    #[serde(default)]
    pub guid: Option<String>,

    /// Link to the listing on the lister's site.
    #[serde(default)]
    pub lister_url: Option<String>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub bedroom_number: Option<u32>,

    #[serde(default, deserialize_with = "lenient_count")]
    pub bathroom_number: Option<u32>,

    #[serde(default)]
    pub property_type: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    /// Comma-separated feature keywords.
    #[serde(default)]
    pub keywords: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Listing {
    /// Price text shown in list rows: everything before the first space of
    /// `price_formatted`, dropping the currency/unit suffix.
    ///
    /// A price with no space is returned whole.
    pub fn display_price(&self) -> &str {
        self.price_formatted
            .split(' ')
            .next()
            .unwrap_or(&self.price_formatted)
    }

    /// Key used to tell rows apart.
    ///
    /// Falls back from `guid` to `lister_url` to `img_url`.
    pub fn row_key(&self) -> &str {
        self.guid
            .as_deref()
            .or(self.lister_url.as_deref())
            .unwrap_or(&self.img_url)
    }

    /// Thumbnail URL for list rows, falling back to the full image.
    pub fn thumbnail(&self) -> &str {
        self.thumb_url.as_deref().unwrap_or(&self.img_url)
    }

    /// Keywords split on commas, trimmed, empties removed.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .map(|k| {
                k.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Accept a count as a JSON number, a numeric string, or null.
///
/// The API is inconsistent about this; anything unparseable becomes `None`
/// rather than failing the whole response.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
