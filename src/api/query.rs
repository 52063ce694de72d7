//! Search URL construction.
//!
//! Every request starts from the same fixed parameter set; exactly one filter
//! parameter (place name or centre point) varies per search.

/// Listings search endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://api.nestoria.co.uk/api";

/// Filter parameter that overrides the fixed defaults for one search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// Free text place name or postcode.
    PlaceName,
    /// `"<lat>,<lon>"` coordinate pair.
    CentrePoint,
    /// Any other API filter name, passed through verbatim.
    Other(String),
}

impl FilterKey {
    /// Query-string parameter name.
    pub fn as_str(&self) -> &str {
        match self {
            FilterKey::PlaceName => "place_name",
            FilterKey::CentrePoint => "centre_point",
            FilterKey::Other(name) => name,
        }
    }
}

/// Configurable part of the fixed parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefaults {
    pub base_url: String,
    pub country: String,
    pub listing_type: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: "uk".to_string(),
            listing_type: "buy".to_string(),
        }
    }
}

/// One search: filter override plus page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub key: FilterKey,
    pub value: String,
    /// 1-based page number.
    pub page: u32,
}

impl SearchQuery {
    /// First page of a place-name search.
    pub fn place_name(value: impl Into<String>) -> Self {
        Self {
            key: FilterKey::PlaceName,
            value: value.into(),
            page: 1,
        }
    }

    /// First page of a search around a `"<lat>,<lon>"` point.
    pub fn centre_point(value: impl Into<String>) -> Self {
        Self {
            key: FilterKey::CentrePoint,
            value: value.into(),
            page: 1,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Full request URL for this query.
    pub fn to_url(&self, defaults: &QueryDefaults) -> String {
        build_search_url_with(defaults, self.key.as_str(), &self.value, self.page)
    }
}

/// Build a request URL against the default endpoint and parameters.
pub fn build_search_url(key: &str, value: &str, page: u32) -> String {
    build_search_url_with(&QueryDefaults::default(), key, value, page)
}

/// Build a request URL from `defaults` with `key=value` overriding.
///
/// Parameters serialize in a fixed order: `country`, `pretty`, `encoding`,
/// `listing_type`, `action`, `page`. A `key` naming one of those replaces its
/// value in place; any other key is appended last. Keys and values are
/// percent-encoded with `encodeURIComponent` rules, so spaces, commas and
/// ampersands in free text never break the query string.
///
/// A page of 0 is treated as page 1.
pub fn build_search_url_with(defaults: &QueryDefaults, key: &str, value: &str, page: u32) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("country", defaults.country.clone()),
        ("pretty", "1".to_string()),
        ("encoding", "json".to_string()),
        ("listing_type", defaults.listing_type.clone()),
        ("action", "search_listings".to_string()),
        ("page", page.max(1).to_string()),
    ];

    match params.iter_mut().find(|(name, _)| *name == key) {
        Some(slot) => slot.1 = value.to_string(),
        None => params.push((key, value.to_string())),
    }

    let query = params
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", defaults.base_url, query)
}
