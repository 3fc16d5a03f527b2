//! Transport for the linked-data API.

use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Fetch operation against the linked-data API.
///
/// Implementations return the `result` envelope of the response document.
/// Use [`HttpLinkedDataClient`] for real requests, or the mock implementation
/// for tests. Errors are raised for non-success statuses and undecodable
/// payloads; nothing is retried here.
pub trait LinkedDataClient {
    /// GET `{base}/{path}` with the given query parameters and return the
    /// `result` object of the JSON response.
    ///
    /// # Errors
    ///
    /// Returns a transport error on request failure, non-success status, or
    /// a response without the expected envelope.
    fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// Blocking HTTP implementation of [`LinkedDataClient`].
pub struct HttpLinkedDataClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpLinkedDataClient {
    /// Create a client against the given base URL with default transport
    /// settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest` client (custom timeouts,
    /// proxies, and so on).
    pub fn with_client(http: reqwest::blocking::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Build the client described by a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .build()?;
        Ok(Self::with_client(http, config.linked_data.base_url.clone()))
    }
}

impl LinkedDataClient for HttpLinkedDataClient {
    fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        tracing::debug!(%url, "fetching linked-data document");

        let response = self.http.get(&url).query(query).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        let document: Value = response.json()?;
        document
            .get("result")
            .cloned()
            .ok_or_else(|| Error::decode("linked-data response", "missing `result` envelope"))
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::missing_panics_doc, clippy::must_use_candidate)]
pub mod mock {
    //! Mock implementation for tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use serde_json::Value;

    use super::LinkedDataClient;
    use crate::error::{Error, Result};

    /// One recorded `fetch_json` invocation.
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub path: String,
        pub query: Vec<(String, String)>,
    }

    /// Mock [`LinkedDataClient`] serving queued responses in order.
    ///
    /// Queue responses with [`queue_response`](Self::queue_response) /
    /// [`queue_result`](Self::queue_result) and verify traffic with
    /// [`calls`](Self::calls). An empty queue answers with a 404-style
    /// status error.
    #[derive(Default)]
    pub struct MockLinkedDataClient {
        responses: RefCell<VecDeque<Result<Value>>>,
        calls: RefCell<Vec<RecordedCall>>,
    }

    impl MockLinkedDataClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the `result` envelope returned by the next call.
        pub fn queue_response(&self, result: Value) {
            self.queue_result(Ok(result));
        }

        /// Queue an arbitrary outcome for the next call.
        pub fn queue_result(&self, result: Result<Value>) {
            self.responses.borrow_mut().push_back(result);
        }

        /// All calls made so far, in order.
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.borrow().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl LinkedDataClient for MockLinkedDataClient {
        fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
            self.calls.borrow_mut().push(RecordedCall {
                path: path.to_string(),
                query: query
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), value.clone()))
                    .collect(),
            });

            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(Error::Status {
                        status: 404,
                        url: path.to_string(),
                    })
                })
        }
    }
}
