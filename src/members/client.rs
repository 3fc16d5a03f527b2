//! Transport for the members-query API.

use crate::chamber::Chamber;
use crate::config::Config;
use crate::error::{Error, Result};

use super::types::MembersDocument;

/// Parameters of a members-query request.
///
/// The service takes its parameters as a `|`-separated path segment rather
/// than a query string, e.g. `id=172` or `House=Commons|IsEligible=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembersQuery {
    /// Restrict to one house.
    pub chamber: Option<Chamber>,
    /// Restrict to a single member by numeric id.
    pub member_id: Option<u32>,
    /// Only members currently eligible to sit.
    pub eligible_only: bool,
}

impl MembersQuery {
    /// Query for a single member's detail record.
    #[must_use]
    pub const fn for_member(member_id: u32) -> Self {
        Self {
            chamber: None,
            member_id: Some(member_id),
            eligible_only: false,
        }
    }

    /// Query for a house's current roster.
    #[must_use]
    pub const fn roster(chamber: Chamber) -> Self {
        Self {
            chamber: Some(chamber),
            member_id: None,
            eligible_only: true,
        }
    }

    /// Render the query as the service's path segment.
    #[must_use]
    pub fn path_segment(&self) -> String {
        let mut parts = Vec::new();
        if let Some(member_id) = self.member_id {
            parts.push(format!("id={member_id}"));
        }
        if let Some(chamber) = self.chamber {
            parts.push(format!("House={}", chamber.name()));
        }
        if self.eligible_only {
            parts.push("IsEligible=true".to_string());
        }
        parts.join("|")
    }
}

/// Fetch operation against the members-query API.
///
/// Implementations return the parsed `<Members>` document. Errors are raised
/// for non-success statuses and unparseable XML; nothing is retried here.
pub trait MembersQueryClient {
    /// Run a members query and return the parsed document.
    ///
    /// # Errors
    ///
    /// Returns a transport error on request failure, non-success status, or
    /// an undecodable payload.
    fn fetch_members(&self, query: &MembersQuery) -> Result<MembersDocument>;
}

/// Blocking HTTP implementation of [`MembersQueryClient`].
pub struct HttpMembersQueryClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpMembersQueryClient {
    /// Create a client against the given base URL with default transport
    /// settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest` client.
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
        Ok(Self::with_client(http, config.members_query.base_url.clone()))
    }
}

impl MembersQueryClient for HttpMembersQueryClient {
    fn fetch_members(&self, query: &MembersQuery) -> Result<MembersDocument> {
        let url = format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            query.path_segment()
        );
        tracing::debug!(%url, "fetching members document");

        let response = self.http.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text()?;
        quick_xml::de::from_str(&body).map_err(|err| Error::decode("members document", err))
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::missing_panics_doc, clippy::must_use_candidate)]
pub mod mock {
    //! Mock implementation for tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{MembersQuery, MembersQueryClient};
    use crate::error::{Error, Result};
    use crate::members::types::MembersDocument;

    /// Mock [`MembersQueryClient`] serving queued documents in order.
    ///
    /// Queue outcomes with [`queue_document`](Self::queue_document) /
    /// [`queue_result`](Self::queue_result) and verify traffic with
    /// [`calls`](Self::calls). An empty queue answers with a 404-style
    /// status error.
    #[derive(Default)]
    pub struct MockMembersQueryClient {
        responses: RefCell<VecDeque<Result<MembersDocument>>>,
        calls: RefCell<Vec<MembersQuery>>,
    }

    impl MockMembersQueryClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the document returned by the next call.
        pub fn queue_document(&self, document: MembersDocument) {
            self.queue_result(Ok(document));
        }

        /// Queue an arbitrary outcome for the next call.
        pub fn queue_result(&self, result: Result<MembersDocument>) {
            self.responses.borrow_mut().push_back(result);
        }

        /// All queries made so far, in order.
        pub fn calls(&self) -> Vec<MembersQuery> {
            self.calls.borrow().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl MembersQueryClient for MockMembersQueryClient {
        fn fetch_members(&self, query: &MembersQuery) -> Result<MembersDocument> {
            self.calls.borrow_mut().push(query.clone());

            self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
                Err(Error::Status {
                    status: 404,
                    url: query.path_segment(),
                })
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_path_segments() {
        let cases = [
            (MembersQuery::for_member(172), "id=172"),
            (
                MembersQuery::roster(Chamber::Commons),
                "House=Commons|IsEligible=true",
            ),
            (
                MembersQuery::roster(Chamber::Lords),
                "House=Lords|IsEligible=true",
            ),
            (MembersQuery::default(), ""),
        ];
        for (query, expected) in cases {
            assert_eq!(query.path_segment(), expected);
        }
    }
}
