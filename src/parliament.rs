//! Session root and house facades.
//!
//! A [`Parliament`] owns the two transport collaborators and one [`House`]
//! per chamber; each house owns its own member registry, so member identity
//! holds for as long as the session is alive. Everything is single-threaded
//! and blocking - a fetch returns when the remote answers or fails, and
//! nothing here retries.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bill::{Bill, BillSummaryItem};
use crate::chamber::Chamber;
use crate::config::Config;
use crate::division::{Division, DivisionSummaryItem};
use crate::edm::{EarlyDayMotion, EdmItem};
use crate::error::{Error, Result};
use crate::lda::{HttpLinkedDataClient, LinkedDataClient};
use crate::members::{
    HttpMembersQueryClient, MemberList, MemberRegistry, MembersQuery, MembersQueryClient,
};
use crate::members::Member;
use crate::parties::PartyRegistry;

/// Far-future date bound used to defeat upstream listing caches. Trades a
/// slightly odd query for answers that are actually current.
const CACHE_BUSTING_DATE_BOUND: &str = "9999-12-31";

/// Parameters for a recent-divisions listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionQuery {
    /// Page size requested from upstream.
    pub limit: u32,
    /// Zero-based page number.
    pub page: u32,
    /// Exclusive low-water mark: divisions whose uin is lexically less than
    /// or equal to this are dropped. Raw identifier comparison - pass a uin
    /// from the same family as the listing.
    pub since: Option<String>,
    /// Add the cache-defeating date bound to the request.
    pub force_fresh: bool,
}

impl Default for DivisionQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            page: 0,
            since: None,
            force_fresh: false,
        }
    }
}

/// A session against the upstream APIs.
pub struct Parliament {
    lda: Rc<dyn LinkedDataClient>,
    parties: PartyRegistry,
    commons: House,
    lords: House,
}

impl Parliament {
    /// Session against the public endpoints with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Session configured from the environment (see [`Config::load`]).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the HTTP clients
    /// cannot be constructed.
    pub fn from_env() -> Result<Self> {
        Self::with_config(&Config::load()?)
    }

    /// Session against the endpoints described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be constructed.
    pub fn with_config(config: &Config) -> Result<Self> {
        let lda: Rc<dyn LinkedDataClient> = Rc::new(HttpLinkedDataClient::from_config(config)?);
        let members_api: Rc<dyn MembersQueryClient> =
            Rc::new(HttpMembersQueryClient::from_config(config)?);
        Ok(Self::with_clients(lda, members_api))
    }

    /// Session over caller-supplied transports. This is the seam tests use
    /// to substitute mock collaborators.
    #[must_use]
    pub fn with_clients(
        lda: Rc<dyn LinkedDataClient>,
        members_api: Rc<dyn MembersQueryClient>,
    ) -> Self {
        let parties = PartyRegistry::new();
        let commons = House::new(
            Chamber::Commons,
            Rc::clone(&lda),
            Rc::clone(&members_api),
            parties,
        );
        let lords = House::new(Chamber::Lords, Rc::clone(&lda), members_api, parties);
        Self {
            lda,
            parties,
            commons,
            lords,
        }
    }

    /// The House of Commons facade. Clones share the session's registry.
    #[must_use]
    pub fn commons(&self) -> House {
        self.commons.clone()
    }

    /// The House of Lords facade. Clones share the session's registry.
    #[must_use]
    pub fn lords(&self) -> House {
        self.lords.clone()
    }

    #[must_use]
    pub fn house(&self, chamber: Chamber) -> House {
        match chamber {
            Chamber::Commons => self.commons(),
            Chamber::Lords => self.lords(),
        }
    }

    /// The static party catalogue.
    #[must_use]
    pub fn parties(&self) -> PartyRegistry {
        self.parties
    }

    /// List bills, newest page first per upstream ordering.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    pub fn bills(&self, limit: u32, page: u32) -> Result<Vec<Bill>> {
        let params = [
            ("_pageSize", limit.to_string()),
            ("_page", page.to_string()),
        ];
        let result = self.lda.fetch_json("bills.json", &params)?;
        let items: Vec<BillSummaryItem> = items_from(result, "bill listing")?;
        items
            .into_iter()
            .map(|item| Bill::from_summary(Rc::clone(&self.lda), item))
            .collect()
    }
}

impl fmt::Debug for Parliament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parliament").finish_non_exhaustive()
    }
}

/// Per-house listing operations.
///
/// Cheap to clone; all clones share the same member registry.
#[derive(Clone)]
pub struct House {
    inner: Rc<HouseInner>,
}

struct HouseInner {
    chamber: Chamber,
    lda: Rc<dyn LinkedDataClient>,
    members_api: Rc<dyn MembersQueryClient>,
    members: MemberRegistry,
}

impl House {
    pub(crate) fn new(
        chamber: Chamber,
        lda: Rc<dyn LinkedDataClient>,
        members_api: Rc<dyn MembersQueryClient>,
        parties: PartyRegistry,
    ) -> Self {
        let members = MemberRegistry::new(chamber, Rc::clone(&members_api), parties);
        Self {
            inner: Rc::new(HouseInner {
                chamber,
                lda,
                members_api,
                members,
            }),
        }
    }

    #[must_use]
    pub fn chamber(&self) -> Chamber {
        self.inner.chamber
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.inner.chamber.name()
    }

    /// This house's member registry.
    #[must_use]
    pub fn members(&self) -> &MemberRegistry {
        &self.inner.members
    }

    /// Resolve a member of this house by id, without fetching.
    #[must_use]
    pub fn member(&self, member_id: u32) -> Member {
        self.inner.members.resolve_by_id(member_id)
    }

    pub(crate) fn lda_client(&self) -> &Rc<dyn LinkedDataClient> {
        &self.inner.lda
    }

    /// List recent divisions.
    ///
    /// Fetches one page of summaries, drops items at or below the `since`
    /// low-water mark, and re-sorts by date then uin descending because
    /// upstream ordering is unreliable within a day.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    pub fn recent_divisions(&self, query: &DivisionQuery) -> Result<Vec<Division>> {
        let path = format!("{}divisions.json", self.inner.chamber.path_prefix());
        let mut params = vec![
            ("_pageSize", query.limit.to_string()),
            ("_page", query.page.to_string()),
        ];
        if query.force_fresh {
            params.push(("max-date", CACHE_BUSTING_DATE_BOUND.to_string()));
        }

        let result = self.inner.lda.fetch_json(&path, &params)?;
        let items: Vec<DivisionSummaryItem> = items_from(result, "division listing")?;

        let mut divisions = Vec::with_capacity(items.len());
        for item in items {
            if let Some(since) = query.since.as_deref() {
                if item.uin.as_str() <= since {
                    continue;
                }
            }
            divisions.push(Division::from_summary(self, item)?);
        }

        divisions.sort_unstable();
        Ok(divisions)
    }

    /// The house's current roster, in upstream order.
    ///
    /// Every record is resolved through the member registry and merged, so
    /// roster data enriches members already seen in vote lists.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures.
    pub fn current_members(&self) -> Result<MemberList> {
        let document = self
            .inner
            .members_api
            .fetch_members(&MembersQuery::roster(self.inner.chamber))?;

        Ok(document
            .members
            .iter()
            .map(|record| {
                let member = self.inner.members.resolve_by_id(record.member_id);
                member.merge_record(record);
                member
            })
            .collect())
    }

    /// List early day motions. Commons only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommonsOnly`] for the Lords; otherwise propagates
    /// transport and decode failures.
    pub fn early_day_motions(&self, limit: u32, page: u32) -> Result<Vec<EarlyDayMotion>> {
        if self.inner.chamber != Chamber::Commons {
            return Err(Error::CommonsOnly {
                operation: "early day motions",
            });
        }

        let params = [
            ("_pageSize", limit.to_string()),
            ("_page", page.to_string()),
        ];
        let result = self.inner.lda.fetch_json("edms.json", &params)?;
        let items: Vec<EdmItem> = items_from(result, "edm listing")?;
        items.into_iter().map(EarlyDayMotion::from_item).collect()
    }
}

impl fmt::Debug for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("House")
            .field("chamber", &self.inner.chamber)
            .finish_non_exhaustive()
    }
}

/// Pull the `items` array out of a listing envelope and decode it.
fn items_from<T: DeserializeOwned>(result: Value, context: &'static str) -> Result<Vec<T>> {
    let items = result
        .get("items")
        .cloned()
        .ok_or_else(|| Error::decode(context, "missing `items`"))?;
    serde_json::from_value(items).map_err(|err| Error::decode(context, err))
}
