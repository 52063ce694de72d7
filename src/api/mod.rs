//! Listings search API: URL construction, response schema, transport.

pub mod client;
pub mod query;
pub mod response;

pub use client::{spawn_fetch, FetchOutcome, FetchRequest, HttpListingsApi, ListingsApi};
pub use query::{
    build_search_url, build_search_url_with, FilterKey, QueryDefaults, SearchQuery,
    DEFAULT_BASE_URL,
};
pub use response::{classify, parse_search_body, ResponseClass, SearchEnvelope, SearchResponse};
