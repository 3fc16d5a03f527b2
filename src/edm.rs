//! Early day motions.
//!
//! EDMs are fully populated from the listing payload; there is no deferred
//! fetch behind them.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Result;
use crate::lda::value::{require_date, require_text, require_u32, Field};

/// An early day motion tabled in the Commons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyDayMotion {
    pub title: String,
    /// Parliamentary session, e.g. "2017-19".
    pub session: String,
    /// EDM number within the session.
    pub number: u32,
    pub date_tabled: NaiveDate,
    pub status: String,
    /// Sponsors as printed, when the listing carries them.
    pub sponsors: Vec<String>,
    pub primary_sponsor: String,
    /// Signature count at the time of the listing.
    pub signatures: u32,
}

/// One item of an `edms.json` listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EdmItem {
    title: String,
    session: Field,
    #[serde(rename = "edmNumber")]
    number: Field,
    #[serde(rename = "dateTabled")]
    date_tabled: Field,
    #[serde(rename = "edmStatus")]
    status: Field,
    #[serde(rename = "sponsorPrinted", default)]
    sponsors: Vec<String>,
    #[serde(rename = "primarySponsorPrinted")]
    primary_sponsor: String,
    #[serde(rename = "numberOfSignatures")]
    signatures: u32,
}

impl EarlyDayMotion {
    pub(crate) fn from_item(item: EdmItem) -> Result<Self> {
        Ok(Self {
            title: item.title,
            session: require_text(&item.session, "session")?,
            number: require_u32(&item.number, "edmNumber")?,
            date_tabled: require_date(&item.date_tabled, "dateTabled")?,
            status: require_text(&item.status, "edmStatus")?,
            sponsors: item.sponsors,
            primary_sponsor: item.primary_sponsor,
            signatures: item.signatures,
        })
    }
}

impl fmt::Display for EarlyDayMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EDM {}: \"{}\"", self.number, self.title)
    }
}
