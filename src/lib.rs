//! Typed, lazily-populated client for the UK Parliament APIs.
//!
//! Exposes the public linked-data (JSON) and members-query (XML) services as
//! domain objects: divisions, bills, early day motions, members, parties.
//! Listings produce cheap stubs; the first access to a field the stub does
//! not carry triggers one blocking detail fetch, cached for the life of the
//! object. Members are deduplicated per house through a registry, so a vote
//! list and a roster listing enrich the same instances.
//!
//! The whole crate is synchronous and single-threaded; share a [`Parliament`]
//! within one thread, or build one per thread.
//!
//! ```no_run
//! use ukparliament::{DivisionQuery, Parliament};
//!
//! # fn main() -> ukparliament::Result<()> {
//! let parliament = Parliament::new()?;
//! let commons = parliament.commons();
//!
//! for division in commons.recent_divisions(&DivisionQuery::default())? {
//!     println!("{division} - passed: {}", division.passed()?);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod bill;
pub mod chamber;
pub mod config;
pub mod division;
pub mod edm;
pub mod error;
pub mod lda;
pub mod members;
pub mod parliament;
pub mod parties;
mod resource;

pub use bill::Bill;
pub use chamber::Chamber;
pub use config::Config;
pub use division::Division;
pub use edm::EarlyDayMotion;
pub use error::{Error, Result};
pub use members::{Member, MemberList, MemberRegistry, VoteFragment};
pub use parliament::{DivisionQuery, House, Parliament};
pub use parties::{Party, PartyRegistry};
