//! The member object model.
//!
//! A [`Member`] is a cheap-clone handle over shared state, so every lookup of
//! the same (house, id) pair through one registry observes the same data.
//! Identity is the (house, id) key; everything else is a value that arrives
//! incrementally from three sources - vote fragments, roster listings, and
//! the one-shot detail fetch - and merges as "fill absent, never overwrite
//! present".

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::chamber::Chamber;
use crate::error::{Error, Result};
use crate::parties::{Party, PartyRegistry};
use crate::resource::Deferred;

use super::client::{MembersQuery, MembersQueryClient};
use super::types::{parse_member_date, MemberRecord};

/// A member of either house.
#[derive(Clone)]
pub struct Member {
    state: Rc<MemberShared>,
}

struct MemberShared {
    chamber: Chamber,
    id: u32,
    api: Rc<dyn MembersQueryClient>,
    parties: PartyRegistry,
    /// Guards the one-shot detail fetch; merges from vote fragments and
    /// roster listings never fill it.
    fetch: Deferred<()>,
    data: RefCell<MemberData>,
}

#[derive(Default)]
struct MemberData {
    display_name: Option<String>,
    party: Option<Party>,
    full_title: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<NaiveDate>,
    house_start_date: Option<NaiveDate>,
    house_end_date: Option<NaiveDate>,
    member_from: Option<String>,
}

impl Member {
    pub(crate) fn stub(
        chamber: Chamber,
        id: u32,
        api: Rc<dyn MembersQueryClient>,
        parties: PartyRegistry,
    ) -> Self {
        Self {
            state: Rc::new(MemberShared {
                chamber,
                id,
                api,
                parties,
                fetch: Deferred::new(),
                data: RefCell::new(MemberData::default()),
            }),
        }
    }

    #[must_use]
    pub fn chamber(&self) -> Chamber {
        self.state.chamber
    }

    /// Numeric member identifier, unique within the house.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.state.id
    }

    /// Whether two handles refer to the same shared member instance.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// The member's party, if one has been resolved so far.
    ///
    /// This never triggers a fetch: a genuine no-party affiliation
    /// (Crossbench peers, Bishops) is indistinguishable upstream from an
    /// unpopulated one, and must not cost a request per read.
    #[must_use]
    pub fn party(&self) -> Option<Party> {
        self.state.data.borrow().party
    }

    /// Display name, fetching the detail record if it is not yet known.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// the service has no display name for this member.
    pub fn display_name(&self) -> Result<String> {
        self.deferred_field("display_name", |data| data.display_name.clone())
    }

    /// Full styled name, e.g. "Rt Hon Diane Abbott MP".
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn full_title(&self) -> Result<String> {
        self.deferred_field("full_title", |data| data.full_title.clone())
    }

    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn gender(&self) -> Result<String> {
        self.deferred_field("gender", |data| data.gender.clone())
    }

    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn date_of_birth(&self) -> Result<NaiveDate> {
        self.deferred_field("date_of_birth", |data| data.date_of_birth)
    }

    /// Date the member first sat in the house.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn house_start_date(&self) -> Result<NaiveDate> {
        self.deferred_field("house_start_date", |data| data.house_start_date)
    }

    /// Date the member left the house. Genuinely absent for sitting members.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn house_end_date(&self) -> Result<NaiveDate> {
        self.deferred_field("house_end_date", |data| data.house_end_date)
    }

    /// Constituency for MPs; member type (e.g. "Life peer") for Lords.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// absent after the detail fetch.
    pub fn member_from(&self) -> Result<String> {
        self.deferred_field("member_from", |data| data.member_from.clone())
    }

    /// Deferred-field protocol: serve the attribute if present, otherwise
    /// run the one-shot detail fetch and re-read. A second miss after a
    /// completed fetch fails immediately instead of fetching again.
    fn deferred_field<R>(
        &self,
        attribute: &'static str,
        read: impl Fn(&MemberData) -> Option<R>,
    ) -> Result<R> {
        if let Some(value) = read(&self.state.data.borrow()) {
            return Ok(value);
        }

        if !self.state.fetch.is_fetched() {
            self.fetch_detail()?;
            if let Some(value) = read(&self.state.data.borrow()) {
                return Ok(value);
            }
        }

        Err(Error::MissingAttribute {
            resource: "member",
            attribute,
        })
    }

    fn fetch_detail(&self) -> Result<()> {
        self.state
            .fetch
            .get_or_fetch(|| {
                tracing::debug!(
                    member = self.state.id,
                    chamber = %self.state.chamber,
                    "fetching member detail"
                );
                let document = self
                    .state
                    .api
                    .fetch_members(&MembersQuery::for_member(self.state.id))?;
                let record = document
                    .members
                    .iter()
                    .find(|record| record.member_id == self.state.id)
                    .ok_or_else(|| {
                        Error::decode("member detail", "no record for the requested member")
                    })?;
                self.merge_record(record);
                Ok(())
            })
            .map(|_| ())
    }

    /// Merge a roster/detail record into this member, filling absent fields
    /// only.
    pub(crate) fn merge_record(&self, record: &MemberRecord) {
        let party = clean(record.party.as_deref()).and_then(|name| {
            resolve_party(self.state.parties, name)
        });

        let mut data = self.state.data.borrow_mut();
        fill(
            &mut data.display_name,
            clean(record.display_as.as_deref()).map(str::to_string),
        );
        fill(&mut data.party, party);
        fill(
            &mut data.full_title,
            clean(record.full_title.as_deref()).map(str::to_string),
        );
        fill(
            &mut data.gender,
            clean(record.gender.as_deref()).map(str::to_string),
        );
        fill(
            &mut data.date_of_birth,
            clean(record.date_of_birth.as_deref()).and_then(parse_member_date),
        );
        fill(
            &mut data.house_start_date,
            clean(record.house_start_date.as_deref()).and_then(parse_member_date),
        );
        fill(
            &mut data.house_end_date,
            clean(record.house_end_date.as_deref()).and_then(parse_member_date),
        );
        fill(
            &mut data.member_from,
            clean(record.member_from.as_deref()).map(str::to_string),
        );
    }

    /// Merge the name/party pair carried by a vote fragment. Never fetches.
    pub(crate) fn merge_summary(&self, display_name: Option<&str>, party: Option<Party>) {
        let mut data = self.state.data.borrow_mut();
        fill(
            &mut data.display_name,
            clean(display_name).map(str::to_string),
        );
        fill(&mut data.party, party);
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("chamber", &self.state.chamber)
            .field("id", &self.state.id)
            .field("display_name", &self.state.data.borrow().display_name)
            .field("party", &self.state.data.borrow().party)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state.data.borrow().display_name {
            Some(name) => write!(f, "{name} ({} #{})", self.state.chamber, self.state.id),
            None => write!(f, "member #{} ({})", self.state.id, self.state.chamber),
        }
    }
}

/// Identity comparison: two handles are equal when they share state.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Member {}

/// Fill-absent-never-overwrite merge for one field.
fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Treat empty/blank upstream strings as absent.
fn clean(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Party-name lookup that degrades to no-party for upstream noise.
pub(crate) fn resolve_party(registry: PartyRegistry, name: &str) -> Option<Party> {
    let party = registry.lookup(name);
    if party.is_none() {
        tracing::debug!(party = name, "unrecognised party name, treating as no party");
    }
    party
}

/// An ordered list of members with an on-demand party breakdown.
#[derive(Debug, Clone, Default)]
pub struct MemberList {
    members: Vec<Member>,
}

impl MemberList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Count of members per party. `None` keys members with no resolved
    /// party. Recomputed on every call so it reflects live assignments.
    #[must_use]
    pub fn by_party(&self) -> HashMap<Option<Party>, usize> {
        let mut counts = HashMap::new();
        for member in &self.members {
            *counts.entry(member.party()).or_insert(0) += 1;
        }
        counts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }
}

impl Deref for MemberList {
    type Target = [Member];

    fn deref(&self) -> &Self::Target {
        &self.members
    }
}

impl From<Vec<Member>> for MemberList {
    fn from(members: Vec<Member>) -> Self {
        Self { members }
    }
}

impl FromIterator<Member> for MemberList {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MemberList {
    type Item = Member;
    type IntoIter = std::vec::IntoIter<Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}
