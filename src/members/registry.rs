//! Per-house member registry.
//!
//! The single point of truth mapping a numeric member id to one shared
//! [`Member`] instance, so that vote tallies and roster listings enrich the
//! same object instead of spawning duplicates. A plain in-process cache: no
//! eviction, no locking - one registry per house session, single-threaded
//! like the rest of the crate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;

use crate::chamber::Chamber;
use crate::error::{Error, Result};
use crate::lda::value::Field;
use crate::parties::PartyRegistry;

use super::client::MembersQueryClient;
use super::member::{resolve_party, Member};

/// Identifier → instance cache for one house.
pub struct MemberRegistry {
    chamber: Chamber,
    api: Rc<dyn MembersQueryClient>,
    parties: PartyRegistry,
    cache: RefCell<HashMap<u32, Member>>,
}

impl MemberRegistry {
    pub(crate) fn new(
        chamber: Chamber,
        api: Rc<dyn MembersQueryClient>,
        parties: PartyRegistry,
    ) -> Self {
        Self {
            chamber,
            api,
            parties,
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn chamber(&self) -> Chamber {
        self.chamber
    }

    /// Number of distinct members resolved so far.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Return the cached instance for this id, or construct and cache a new
    /// stub. Never fetches.
    #[must_use]
    pub fn resolve_by_id(&self, member_id: u32) -> Member {
        self.cache
            .borrow_mut()
            .entry(member_id)
            .or_insert_with(|| {
                Member::stub(self.chamber, member_id, Rc::clone(&self.api), self.parties)
            })
            .clone()
    }

    /// Resolve a member from their canonical URL.
    ///
    /// Two shapes are recognised: `…/members/{id}` and `…/lords/id/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedReference`] for anything else.
    pub fn resolve_by_url(&self, url: &str) -> Result<Member> {
        Ok(self.resolve_by_id(member_id_from_url(url)?))
    }

    /// Resolve a member from an inline vote-summary fragment, merging in the
    /// display name and party it carries without overwriting richer data and
    /// without fetching.
    ///
    /// An unrecognised party name degrades to no-party so that one noisy
    /// upstream value cannot break retrieval of a whole vote list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedReference`] if the fragment's member URL
    /// matches neither known shape or the fragment carries no reference.
    pub fn resolve_from_vote_fragment(&self, fragment: &VoteFragment) -> Result<Member> {
        match fragment {
            VoteFragment::Commons(commons) => {
                let reference = commons.member.first().ok_or_else(|| {
                    Error::MalformedReference(
                        "commons vote fragment without a member reference".to_string(),
                    )
                })?;
                let member = self.resolve_by_url(&reference.about)?;
                let name = commons.printed.as_text();
                let party = self.fragment_party(commons.party.as_ref());
                member.merge_summary(name.as_deref(), party);
                Ok(member)
            }
            VoteFragment::Lords(lords) => {
                let member = self.resolve_by_url(&lords.member)?;
                let name = lords.title.as_text();
                let party = self.fragment_party(lords.party.as_ref());
                member.merge_summary(name.as_deref(), party);
                Ok(member)
            }
        }
    }

    fn fragment_party(&self, field: Option<&Field>) -> Option<crate::parties::Party> {
        field
            .and_then(Field::as_text)
            .and_then(|name| resolve_party(self.parties, &name))
    }
}

impl std::fmt::Debug for MemberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberRegistry")
            .field("chamber", &self.chamber)
            .field("cached", &self.cached_count())
            .finish_non_exhaustive()
    }
}

/// An inline member reference embedded in a division's vote list.
///
/// The two houses ship different shapes: Commons nests an object carrying
/// the canonical URL and a printed name; Lords gives the URL directly with
/// the peer's printed title (and rank) alongside.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VoteFragment {
    Commons(CommonsVoteFragment),
    Lords(LordsVoteFragment),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonsVoteFragment {
    #[serde(rename = "member")]
    member: Vec<MemberReference>,
    #[serde(rename = "memberPrinted")]
    printed: Field,
    #[serde(rename = "memberParty", default)]
    party: Option<Field>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LordsVoteFragment {
    /// Canonical member URL, given bare rather than nested.
    #[serde(rename = "member")]
    member: String,
    /// Printed title, e.g. "Lord Naseby".
    #[serde(rename = "lordTitle")]
    title: Field,
    #[serde(rename = "memberParty", default)]
    party: Option<Field>,
}

#[derive(Debug, Clone, Deserialize)]
struct MemberReference {
    #[serde(rename = "_about")]
    about: String,
}

/// Extract the numeric id from a canonical member URL.
fn member_id_from_url(url: &str) -> Result<u32> {
    let trimmed = url.trim_end_matches('/');
    let mut segments = trimmed.rsplit('/');
    let id = segments.next().and_then(|last| last.parse().ok());

    match (id, segments.next()) {
        (Some(id), Some("members")) => Ok(id),
        (Some(id), Some("id")) if trimmed.contains("/lords/") => Ok(id),
        _ => Err(Error::MalformedReference(url.to_string())),
    }
}
