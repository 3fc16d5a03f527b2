//! Members-query API collaborator and the member object model.
//!
//! The XML roster/detail service behind `membersdataplatform`. The module
//! follows the same trait-based transport design as [`crate::lda`]:
//!
//! - [`MembersQueryClient`] - Trait defining the fetch operation
//! - [`HttpMembersQueryClient`] - Real blocking HTTP implementation
//! - [`mock::MockMembersQueryClient`] - Mock for tests (behind `test-utils`)
//!
//! On top of the transport sit the domain pieces: [`Member`] (a shared-
//! identity handle with lazily fetched profile fields), [`MemberList`], and
//! the per-house [`MemberRegistry`] that deduplicates member instances.

pub mod client;
pub mod member;
pub mod registry;
pub mod types;

pub use client::{HttpMembersQueryClient, MembersQuery, MembersQueryClient};
pub use member::{Member, MemberList};
pub use registry::{MemberRegistry, VoteFragment};
pub use types::{MemberRecord, MembersDocument};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
