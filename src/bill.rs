//! Bill resources.
//!
//! Bills carry their summary fields eagerly from the listing payload; only
//! the description sits behind a deferred detail fetch.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::lda::value::{require_date, Field};
use crate::lda::LinkedDataClient;
use crate::resource::{id_from_resource_url, Deferred};

/// A bill before Parliament.
#[derive(Clone)]
pub struct Bill {
    lda: Rc<dyn LinkedDataClient>,
    title: String,
    home_page: Option<String>,
    bill_type: Option<String>,
    date: NaiveDate,
    about: String,
    description: Deferred<Option<String>>,
}

/// One item of a `bills.json` listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BillSummaryItem {
    #[serde(rename = "_about")]
    pub about: String,
    pub title: String,
    #[serde(rename = "homePage", default)]
    pub home_page: Option<String>,
    #[serde(rename = "billType", default)]
    pub bill_type: Option<Field>,
    pub date: Field,
}

impl Bill {
    pub(crate) fn from_summary(lda: Rc<dyn LinkedDataClient>, item: BillSummaryItem) -> Result<Self> {
        Ok(Self {
            lda,
            title: item.title,
            home_page: item.home_page,
            bill_type: item.bill_type.as_ref().and_then(Field::as_text),
            date: require_date(&item.date, "bill date")?,
            about: item.about,
            description: Deferred::new(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Home page on parliament.uk, when the listing carried one.
    #[must_use]
    pub fn home_page(&self) -> Option<&str> {
        self.home_page.as_deref()
    }

    #[must_use]
    pub fn bill_type(&self) -> Option<&str> {
        self.bill_type.as_deref()
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Canonical linked-data URL of this bill.
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

    /// Description text, fetching the detail document on first access.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns [`Error::MissingAttribute`] if
    /// the detail document carries no description.
    pub fn description(&self) -> Result<String> {
        let fetched = self.description.get_or_fetch(|| self.fetch_description())?;
        fetched.clone().ok_or(Error::MissingAttribute {
            resource: "bill",
            attribute: "description",
        })
    }

    fn fetch_description(&self) -> Result<Option<String>> {
        let bill_id = self.resource_id()?;
        let path = format!("bills/{bill_id}.json");
        tracing::debug!(title = %self.title, %path, "fetching bill detail");

        let result = self.lda.fetch_json(&path, &[])?;
        let topic = result
            .get("primaryTopic")
            .ok_or_else(|| Error::decode("bill detail", "missing `primaryTopic`"))?;

        Ok(topic
            .get("description")
            .and_then(|value| serde_json::from_value::<Field>(value.clone()).ok())
            .and_then(|field| field.as_text()))
    }
}

impl fmt::Debug for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bill")
            .field("title", &self.title)
            .field("date", &self.date)
            .field("about", &self.about)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bill \"{}\" ({})", self.title, self.date)
    }
}
