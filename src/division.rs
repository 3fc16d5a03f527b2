//! Division resources.
//!
//! A division is one recorded vote in one house. Listings produce cheap
//! stubs (title, uin, date, resource URL); the tallies and per-member vote
//! lists live behind a single deferred detail fetch. The two houses have
//! disjoint tally schemas, so the detail payload is a tagged union and every
//! tally getter is only answerable for one of the two variants - asking a
//! Lords division for `ayes` is a missing attribute, not a zero.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::chamber::Chamber;
use crate::error::{Error, Result};
use crate::lda::value::{require_date, require_u32, Field};
use crate::members::{MemberList, VoteFragment};
use crate::parliament::House;
use crate::resource::{id_from_resource_url, Deferred};

const AYE_VOTE_TAG: &str = "http://data.parliament.uk/schema/parl#AyeVote";
const NO_VOTE_TAG: &str = "http://data.parliament.uk/schema/parl#NoVote";
const CONTENT_VOTE_TAG: &str = "http://data.parliament.uk/schema/parl#ContentVote";
const NOT_CONTENT_VOTE_TAG: &str = "http://data.parliament.uk/schema/parl#NotContentVote";

/// A single vote event in one house.
#[derive(Debug, Clone)]
pub struct Division {
    house: House,
    title: String,
    uin: String,
    date: NaiveDate,
    about: String,
    detail: Deferred<DivisionDetail>,
}

#[derive(Debug, Clone)]
enum DivisionDetail {
    Commons(CommonsTallies),
    Lords(LordsTallies),
}

#[derive(Debug, Clone)]
struct CommonsTallies {
    abstain: u32,
    ayes: u32,
    did_not_vote: u32,
    error_vote: u32,
    margin: u32,
    noes: u32,
    non_eligible: u32,
    suspended_expelled: u32,
    aye_votes: MemberList,
    no_votes: MemberList,
}

#[derive(Debug, Clone)]
struct LordsTallies {
    contents: u32,
    not_contents: u32,
    content_votes: MemberList,
    not_content_votes: MemberList,
}

/// One item of a `…divisions.json` listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DivisionSummaryItem {
    #[serde(rename = "_about")]
    pub about: String,
    pub title: String,
    pub uin: String,
    pub date: Field,
}

#[derive(Debug, Clone, Deserialize)]
struct CommonsDetailDocument {
    #[serde(rename = "AbstainCount")]
    abstain: Field,
    #[serde(rename = "AyesCount")]
    ayes: Field,
    #[serde(rename = "Didnotvotecount")]
    did_not_vote: Field,
    #[serde(rename = "Errorvotecount")]
    error_vote: Field,
    #[serde(rename = "Margin")]
    margin: Field,
    #[serde(rename = "Noesvotecount")]
    noes: Field,
    #[serde(rename = "Noneligiblecount")]
    non_eligible: Field,
    #[serde(rename = "Suspendedorexpelledvotescount")]
    suspended_expelled: Field,
    #[serde(rename = "vote", default)]
    votes: Vec<VoteRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct LordsDetailDocument {
    #[serde(rename = "officialContentsCount")]
    contents: Field,
    #[serde(rename = "officialNotContentsCount")]
    not_contents: Field,
    #[serde(rename = "vote", default)]
    votes: Vec<VoteRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct VoteRecord {
    #[serde(rename = "type")]
    vote_type: String,
    #[serde(flatten)]
    fragment: VoteFragment,
}

impl Division {
    pub(crate) fn from_summary(house: &House, item: DivisionSummaryItem) -> Result<Self> {
        Ok(Self {
            house: house.clone(),
            title: item.title,
            uin: item.uin,
            date: require_date(&item.date, "division date")?,
            about: item.about,
            detail: Deferred::new(),
        })
    }

    #[must_use]
    pub fn house(&self) -> &House {
        &self.house
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The chamber's own serial for this division. Unique within a house,
    /// not globally; compared as a raw identifier.
    #[must_use]
    pub fn uin(&self) -> &str {
        &self.uin
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Canonical linked-data URL of this division.
    #[must_use]
    pub fn resource_url(&self) -> &str {
        &self.about
    }

    /// Numeric identifier extracted from the resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedReference`] if the URL has no trailing
    /// numeric segment.
    pub fn resource_id(&self) -> Result<u32> {
        id_from_resource_url(&self.about)
    }

    /// Whether the motion carried, from whichever tallies this house keeps.
    ///
    /// # Errors
    ///
    /// Propagates a failed detail fetch.
    pub fn passed(&self) -> Result<bool> {
        Ok(match self.detail()? {
            DivisionDetail::Commons(tallies) => tallies.ayes > tallies.noes,
            DivisionDetail::Lords(tallies) => tallies.contents > tallies.not_contents,
        })
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn ayes(&self) -> Result<u32> {
        self.commons_tally("ayes", |tallies| tallies.ayes)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn noes(&self) -> Result<u32> {
        self.commons_tally("noes", |tallies| tallies.noes)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn abstain(&self) -> Result<u32> {
        self.commons_tally("abstain", |tallies| tallies.abstain)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn did_not_vote(&self) -> Result<u32> {
        self.commons_tally("did_not_vote", |tallies| tallies.did_not_vote)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn error_vote(&self) -> Result<u32> {
        self.commons_tally("error_vote", |tallies| tallies.error_vote)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn margin(&self) -> Result<u32> {
        self.commons_tally("margin", |tallies| tallies.margin)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn non_eligible(&self) -> Result<u32> {
        self.commons_tally("non_eligible", |tallies| tallies.non_eligible)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn suspended_expelled(&self) -> Result<u32> {
        self.commons_tally("suspended_expelled", |tallies| tallies.suspended_expelled)
    }

    /// Members who voted aye.
    ///
    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn aye_votes(&self) -> Result<MemberList> {
        self.commons_tally("aye_votes", |tallies| tallies.aye_votes.clone())
    }

    /// Members who voted no.
    ///
    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Lords division.
    pub fn no_votes(&self) -> Result<MemberList> {
        self.commons_tally("no_votes", |tallies| tallies.no_votes.clone())
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Commons division.
    pub fn contents(&self) -> Result<u32> {
        self.lords_tally("contents", |tallies| tallies.contents)
    }

    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Commons division.
    pub fn not_contents(&self) -> Result<u32> {
        self.lords_tally("not_contents", |tallies| tallies.not_contents)
    }

    /// Peers who voted content.
    ///
    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Commons division.
    pub fn content_votes(&self) -> Result<MemberList> {
        self.lords_tally("content_votes", |tallies| tallies.content_votes.clone())
    }

    /// Peers who voted not content.
    ///
    /// # Errors
    ///
    /// Propagates a failed detail fetch; [`Error::MissingAttribute`] for a
    /// Commons division.
    pub fn not_content_votes(&self) -> Result<MemberList> {
        self.lords_tally("not_content_votes", |tallies| {
            tallies.not_content_votes.clone()
        })
    }

    fn commons_tally<R>(
        &self,
        attribute: &'static str,
        read: impl FnOnce(&CommonsTallies) -> R,
    ) -> Result<R> {
        match self.detail()? {
            DivisionDetail::Commons(tallies) => Ok(read(tallies)),
            DivisionDetail::Lords(_) => Err(Error::MissingAttribute {
                resource: "lords division",
                attribute,
            }),
        }
    }

    fn lords_tally<R>(
        &self,
        attribute: &'static str,
        read: impl FnOnce(&LordsTallies) -> R,
    ) -> Result<R> {
        match self.detail()? {
            DivisionDetail::Lords(tallies) => Ok(read(tallies)),
            DivisionDetail::Commons(_) => Err(Error::MissingAttribute {
                resource: "commons division",
                attribute,
            }),
        }
    }

    fn detail(&self) -> Result<&DivisionDetail> {
        self.detail.get_or_fetch(|| self.fetch_detail())
    }

    fn fetch_detail(&self) -> Result<DivisionDetail> {
        let division_id = self.resource_id()?;
        let chamber = self.house.chamber();
        let path = format!("{}divisions/id/{division_id}.json", chamber.path_prefix());
        tracing::debug!(uin = %self.uin, %path, "fetching division detail");

        let result = self.house.lda_client().fetch_json(&path, &[])?;
        let topic = result
            .get("primaryTopic")
            .cloned()
            .ok_or_else(|| Error::decode("division detail", "missing `primaryTopic`"))?;

        match chamber {
            Chamber::Commons => {
                let document: CommonsDetailDocument = serde_json::from_value(topic)
                    .map_err(|err| Error::decode("commons division detail", err))?;
                let (aye_votes, no_votes) =
                    self.classify_votes(&document.votes, AYE_VOTE_TAG, NO_VOTE_TAG)?;
                Ok(DivisionDetail::Commons(CommonsTallies {
                    abstain: require_u32(&document.abstain, "AbstainCount")?,
                    ayes: require_u32(&document.ayes, "AyesCount")?,
                    did_not_vote: require_u32(&document.did_not_vote, "Didnotvotecount")?,
                    error_vote: require_u32(&document.error_vote, "Errorvotecount")?,
                    margin: require_u32(&document.margin, "Margin")?,
                    noes: require_u32(&document.noes, "Noesvotecount")?,
                    non_eligible: require_u32(&document.non_eligible, "Noneligiblecount")?,
                    suspended_expelled: require_u32(
                        &document.suspended_expelled,
                        "Suspendedorexpelledvotescount",
                    )?,
                    aye_votes,
                    no_votes,
                }))
            }
            Chamber::Lords => {
                let document: LordsDetailDocument = serde_json::from_value(topic)
                    .map_err(|err| Error::decode("lords division detail", err))?;
                let (content_votes, not_content_votes) =
                    self.classify_votes(&document.votes, CONTENT_VOTE_TAG, NOT_CONTENT_VOTE_TAG)?;
                Ok(DivisionDetail::Lords(LordsTallies {
                    contents: require_u32(&document.contents, "officialContentsCount")?,
                    not_contents: require_u32(&document.not_contents, "officialNotContentsCount")?,
                    content_votes,
                    not_content_votes,
                }))
            }
        }
    }

    /// Split vote records into the two buckets this house knows. Records
    /// with an unrecognised type tag are dropped (forward compatibility with
    /// upstream schema drift); malformed member references fail loudly.
    fn classify_votes(
        &self,
        votes: &[VoteRecord],
        for_tag: &str,
        against_tag: &str,
    ) -> Result<(MemberList, MemberList)> {
        let mut for_votes = Vec::new();
        let mut against_votes = Vec::new();

        for record in votes {
            let bucket = if record.vote_type == for_tag {
                &mut for_votes
            } else if record.vote_type == against_tag {
                &mut against_votes
            } else {
                tracing::debug!(tag = %record.vote_type, "dropping vote with unrecognised type tag");
                continue;
            };
            bucket.push(
                self.house
                    .members()
                    .resolve_from_vote_fragment(&record.fragment)?,
            );
        }

        Ok((for_votes.into(), against_votes.into()))
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} division: \"{}\" on {}",
            self.house.chamber(),
            self.title,
            self.date
        )
    }
}

impl PartialEq for Division {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.uin == other.uin
    }
}

impl Eq for Division {}

impl PartialOrd for Division {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Chronological-recency order: date descending, then uin descending, so
/// that a plain ascending sort yields the most recent division first.
impl Ord for Division {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| other.uin.cmp(&self.uin))
    }
}
