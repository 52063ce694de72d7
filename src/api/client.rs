//! Listings API transport.
//!
//! Requests run on a worker thread and report back over a channel so the
//! event loop never blocks on the network.

use super::response::{parse_search_body, SearchResponse};
use crate::model::error::FetchError;
use reqwest::blocking::Client;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("propfinder/", env!("CARGO_PKG_VERSION"));

/// Source of search responses.
///
/// Implemented over HTTP for the real API and by canned fakes in tests.
pub trait ListingsApi: Send + Sync {
    /// Perform one GET against a fully built search URL.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-success HTTP status, or undecodable body.
    fn fetch(&self, url: &str) -> Result<SearchResponse, FetchError>;
}

/// `ListingsApi` over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpListingsApi {
    client: Client,
}

impl HttpListingsApi {
    /// Build a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the TLS backend cannot initialize.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

impl ListingsApi for HttpListingsApi {
    fn fetch(&self, url: &str) -> Result<SearchResponse, FetchError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        debug!(bytes = body.len(), "Received listings response body");
        parse_search_body(&body)
    }
}

/// A request the search form wants issued.
///
/// `generation` increases with every submission; outcomes for an older
/// generation than the form's current one are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub url: String,
}

/// Completed request, tagged with the generation it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<SearchResponse, FetchError>,
}

/// Run `request` on a worker thread.
///
/// The returned receiver yields exactly one outcome. If the receiver is
/// dropped first the outcome is discarded.
pub fn spawn_fetch(api: Arc<dyn ListingsApi>, request: FetchRequest) -> Receiver<FetchOutcome> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        info!(generation = request.generation, url = %request.url, "Fetching listings");
        let result = api.fetch(&request.url);
        match &result {
            Ok(response) => debug!(
                generation = request.generation,
                listings = response.listings.len(),
                "Listings request completed"
            ),
            Err(e) => warn!(generation = request.generation, error = %e, "Listings request failed"),
        }

        // Receiver gone means the app moved on or exited.
        let _ = tx.send(FetchOutcome {
            generation: request.generation,
            result,
        });
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Listing;
    use std::sync::Mutex;

    struct RecordingApi {
        urls: Mutex<Vec<String>>,
        result: Result<SearchResponse, FetchError>,
    }

    impl ListingsApi for RecordingApi {
        fn fetch(&self, url: &str) -> Result<SearchResponse, FetchError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.result.clone()
        }
    }

    #[test]
    fn spawn_fetch_delivers_outcome_with_generation() {
        let response = SearchResponse {
            application_response_code: Some(serde_json::json!("100")),
            listings: vec![Listing {
                title: "Flat".to_string(),
                ..Listing::default()
            }],
            ..SearchResponse::default()
        };
        let api = Arc::new(RecordingApi {
            urls: Mutex::new(Vec::new()),
            result: Ok(response.clone()),
        });

        let rx = spawn_fetch(
            api.clone(),
            FetchRequest {
                generation: 7,
                url: "http://example.test/api?page=1".to_string(),
            },
        );
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome.generation, 7);
        assert_eq!(outcome.result, Ok(response));
        assert_eq!(
            *api.urls.lock().unwrap(),
            vec!["http://example.test/api?page=1".to_string()]
        );
    }

    #[test]
    fn spawn_fetch_delivers_errors() {
        let api = Arc::new(RecordingApi {
            urls: Mutex::new(Vec::new()),
            result: Err(FetchError::Status(500)),
        });

        let rx = spawn_fetch(
            api,
            FetchRequest {
                generation: 1,
                url: "http://example.test/api".to_string(),
            },
        );
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome.result, Err(FetchError::Status(500)));
    }

    #[test]
    fn http_api_reports_connection_failure_as_transport_error() {
        let api = HttpListingsApi::new(Duration::from_secs(2)).unwrap();

        // Nothing listens on the discard port locally.
        let err = api.fetch("http://127.0.0.1:9/api").unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
