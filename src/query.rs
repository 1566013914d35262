//! Search parameter construction.
//!
//! Blank values never reach the wire: every setter on
//! [`SearchParamsBuilder`] trims its input and ignores it when empty, and the
//! serialized [`SearchParams`] omits unset fields entirely.
//!
//! # Example
//!
//! ```rust
//! use lostfound_client::query::{SearchParamsBuilder, Status};
//! let params = SearchParamsBuilder::new()
//!     .keyword("  wallet ")
//!     .status(Status::Lost)
//!     .city("")
//!     .build();
//! assert_eq!(params.keyword.as_deref(), Some("wallet"));
//! assert!(params.city.is_none());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LostFoundError, Result};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Whether an item was reported lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Lost,
    Found,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Lost => write!(f, "Lost"),
            Status::Found => write!(f, "Found"),
        }
    }
}

impl FromStr for Status {
    type Err = LostFoundError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(Status::Lost),
            "found" => Ok(Status::Found),
            other => Err(LostFoundError::InvalidArgument(format!(
                "Unknown item status: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchParams
// ---------------------------------------------------------------------------

/// Normalized request body for the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "subCategory", skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_venue: Option<bool>,
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::match_all()
    }
}

impl SearchParams {
    /// The unfiltered query: `{page: 1}`.
    pub fn match_all() -> Self {
        Self {
            keyword: None,
            status: None,
            category: None,
            sub_category: None,
            country: None,
            state: None,
            city: None,
            zipcode: None,
            radius: None,
            near_me: None,
            by_venue: None,
            page: 1,
        }
    }

    /// True when no filter besides `page` is set.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self {
            page: self.page,
            ..Self::match_all()
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ---------------------------------------------------------------------------
// SearchParamsBuilder
// ---------------------------------------------------------------------------

/// Builds [`SearchParams`], dropping blank values. Methods return
/// `&mut Self` for chaining.
pub struct SearchParamsBuilder {
    params: SearchParams,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Default for SearchParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchParamsBuilder {
    /// Start from the unfiltered query on page 1.
    pub fn new() -> Self {
        Self {
            params: SearchParams::match_all(),
        }
    }

    pub fn keyword(&mut self, value: &str) -> &mut Self {
        self.params.keyword = non_blank(value);
        self
    }

    pub fn status(&mut self, status: Status) -> &mut Self {
        self.params.status = Some(status);
        self
    }

    pub fn category(&mut self, value: &str) -> &mut Self {
        self.params.category = non_blank(value);
        self
    }

    pub fn sub_category(&mut self, value: &str) -> &mut Self {
        self.params.sub_category = non_blank(value);
        self
    }

    pub fn country(&mut self, value: &str) -> &mut Self {
        self.params.country = non_blank(value);
        self
    }

    pub fn state(&mut self, value: &str) -> &mut Self {
        self.params.state = non_blank(value);
        self
    }

    pub fn city(&mut self, value: &str) -> &mut Self {
        self.params.city = non_blank(value);
        self
    }

    pub fn zipcode(&mut self, value: &str) -> &mut Self {
        self.params.zipcode = non_blank(value);
        self
    }

    /// Radius around the zipcode. Dropped at build time if no zipcode is set.
    pub fn radius(&mut self, radius: u32) -> &mut Self {
        self.params.radius = Some(radius);
        self
    }

    pub fn near_me(&mut self) -> &mut Self {
        self.params.near_me = Some(true);
        self
    }

    pub fn by_venue(&mut self) -> &mut Self {
        self.params.by_venue = Some(true);
        self
    }

    pub fn page(&mut self, page: u32) -> &mut Self {
        self.params.page = page.max(1);
        self
    }

    pub fn build(&self) -> SearchParams {
        let mut params = self.params.clone();
        if params.zipcode.is_none() {
            params.radius = None;
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Quick search
// ---------------------------------------------------------------------------

/// The coarse type selector next to the quick-search keyword box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuickSearchType {
    NearMe,
    ByVenue,
    Lost,
    Found,
    #[default]
    Any,
}

impl From<&str> for QuickSearchType {
    /// Form values `near_me`, `by_venue`, `lost`, `found`; anything else is
    /// [`QuickSearchType::Any`].
    fn from(value: &str) -> Self {
        match value.trim() {
            "near_me" => QuickSearchType::NearMe,
            "by_venue" => QuickSearchType::ByVenue,
            "lost" => QuickSearchType::Lost,
            "found" => QuickSearchType::Found,
            _ => QuickSearchType::Any,
        }
    }
}

/// Build the params for a quick search. The keyword is required.
pub fn build_quick(keyword: &str, kind: QuickSearchType) -> Result<SearchParams> {
    if keyword.trim().is_empty() {
        return Err(LostFoundError::Validation(
            "Please enter a search keyword.".to_string(),
        ));
    }

    let mut qb = SearchParamsBuilder::new();
    qb.keyword(keyword);
    match kind {
        QuickSearchType::NearMe => {
            qb.near_me();
        }
        QuickSearchType::ByVenue => {
            qb.by_venue();
        }
        QuickSearchType::Lost => {
            qb.status(Status::Lost);
        }
        QuickSearchType::Found => {
            qb.status(Status::Found);
        }
        QuickSearchType::Any => {}
    }
    Ok(qb.build())
}

// ---------------------------------------------------------------------------
// Advanced search
// ---------------------------------------------------------------------------

/// Raw values from the advanced search form, untrimmed.
#[derive(Debug, Clone, Default)]
pub struct AdvancedSearchForm {
    pub status: String,
    pub keyword: String,
    pub category: String,
    pub sub_category: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zipcode: String,
    /// Selected radius option, if any. Only honoured with a zipcode.
    pub radius: Option<u32>,
}

/// Build the params for an advanced search.
///
/// A form with nothing filled in yields exactly `{page: 1}`.
pub fn build_advanced(form: &AdvancedSearchForm) -> Result<SearchParams> {
    let mut qb = SearchParamsBuilder::new();
    if let Some(status) = non_blank(&form.status) {
        qb.status(status.parse()?);
    }
    qb.keyword(&form.keyword)
        .category(&form.category)
        .sub_category(&form.sub_category)
        .country(&form.country)
        .state(&form.state)
        .city(&form.city)
        .zipcode(&form.zipcode);
    if let Some(radius) = form.radius {
        qb.radius(radius);
    }

    let params = qb.build();
    if params.is_unfiltered() {
        return Ok(SearchParams::match_all());
    }
    Ok(params)
}
