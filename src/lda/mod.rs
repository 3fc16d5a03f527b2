//! Linked-data API collaborator.
//!
//! The JSON listing/detail service at `lda.data.parliament.uk`. The module
//! uses a trait-based design for testability:
//!
//! - [`LinkedDataClient`] - Trait defining the fetch operation
//! - [`HttpLinkedDataClient`] - Real blocking HTTP implementation using reqwest
//! - [`mock::MockLinkedDataClient`] - Mock for tests (behind `test-utils`)
//!
//! `value` holds the decoder for the service's value micro-format, where a
//! field may be a bare scalar or a `{"_value": …, "_datatype": …}` wrapper,
//! either of which may additionally be list-wrapped.

pub mod client;
pub(crate) mod value;

pub use client::{HttpLinkedDataClient, LinkedDataClient};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
