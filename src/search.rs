//! Search execution and the held result page.
//!
//! [`SearchState`] is owned by the client; [`Search`] borrows it together
//! with the session and transport. A request replaces the held page only on
//! success, so a failed search (401, server error, bad body) leaves the
//! previous results and parameters exactly as they were.

use std::cell::RefCell;

use crate::config;
use crate::error::{LostFoundError, Result};
use crate::models::SearchResultPage;
use crate::pagination::Pagination;
use crate::query::{self, AdvancedSearchForm, QuickSearchType, SearchParams};
use crate::session::Session;
use crate::transport::Transport;

/// Parameters of the last successful search and the page it returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub params: Option<SearchParams>,
    pub results: SearchResultPage,
}

/// Search interface borrowing the client's search state.
pub struct Search<'a> {
    session: Session<'a>,
    transport: &'a dyn Transport,
    state: &'a RefCell<SearchState>,
}

impl<'a> Search<'a> {
    pub fn new(
        session: Session<'a>,
        transport: &'a dyn Transport,
        state: &'a RefCell<SearchState>,
    ) -> Self {
        Self {
            session,
            transport,
            state,
        }
    }

    // -- Submissions -------------------------------------------------------

    /// Keyword search with a coarse type selector. Always starts at page 1.
    pub fn quick_search(&self, keyword: &str, kind: QuickSearchType) -> Result<SearchResultPage> {
        if !self.session.is_active() {
            return Err(LostFoundError::LoginRequired);
        }
        let params = query::build_quick(keyword, kind)?;
        self.execute(params)
    }

    /// Structured search from the advanced form. Blank fields are dropped.
    pub fn advanced_search(&self, form: &AdvancedSearchForm) -> Result<SearchResultPage> {
        if !self.session.is_active() {
            return Err(LostFoundError::LoginRequired);
        }
        let params = query::build_advanced(form)?;
        self.execute(params)
    }

    /// Send `params` to the search endpoint and hold the returned page.
    ///
    /// * 401 → [`LostFoundError::LoginRequired`]
    /// * other non-success → [`LostFoundError::SearchFailed`]
    ///
    /// Absent or null `results` / `page` / `total_pages` default to `[]`, 1,
    /// 1, and a zero page count reads as 1.
    pub fn execute(&self, params: SearchParams) -> Result<SearchResultPage> {
        let token = self.session.require_token()?;
        let body = params.to_json()?;

        let reply = self
            .transport
            .post_json(config::SEARCH_PATH, Some(&token), &body)?;

        if reply.status == 401 {
            tracing::debug!("search rejected: session expired");
            return Err(LostFoundError::LoginRequired);
        }
        if !reply.is_success() {
            tracing::warn!(status = reply.status, "search failed");
            return Err(LostFoundError::SearchFailed {
                status: reply.status,
            });
        }

        let page = reply.json::<SearchResultPage>()?.normalized();
        tracing::debug!(
            items = page.items.len(),
            page = page.page,
            total_pages = page.total_pages,
            "search results received"
        );

        let mut state = self.state.borrow_mut();
        state.params = Some(params);
        state.results = page.clone();
        Ok(page)
    }

    // -- Navigation --------------------------------------------------------

    /// Re-run the active search on another page.
    ///
    /// Returns `Ok(false)` without a request when `page` is already current.
    pub fn go_to_page(&self, page: u32) -> Result<bool> {
        let (mut params, current, total) = {
            let state = self.state.borrow();
            let params = state.params.clone().ok_or_else(|| {
                LostFoundError::InvalidArgument("No active search to paginate".to_string())
            })?;
            (params, state.results.page, state.results.total_pages)
        };

        if page == current {
            return Ok(false);
        }
        if page < 1 || page > total.max(1) {
            return Err(LostFoundError::InvalidArgument(format!(
                "Page {} is outside 1..={}",
                page, total
            )));
        }

        params.page = page;
        self.execute(params)?;
        Ok(true)
    }

    /// Replace the keyword of the active search and re-run it.
    ///
    /// A blank keyword is ignored. The current page is kept.
    pub fn refine_keyword(&self, keyword: &str) -> Result<bool> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(false);
        }
        let mut params = self
            .state
            .borrow()
            .params
            .clone()
            .ok_or_else(|| LostFoundError::InvalidArgument("No active search to refine".to_string()))?;
        params.keyword = Some(keyword.to_string());
        self.execute(params)?;
        Ok(true)
    }

    // -- Accessors ---------------------------------------------------------

    /// The currently held result page.
    pub fn results(&self) -> SearchResultPage {
        self.state.borrow().results.clone()
    }

    /// Parameters of the last successful search.
    pub fn params(&self) -> Option<SearchParams> {
        self.state.borrow().params.clone()
    }

    /// Pagination bar for the held page.
    pub fn pagination(&self) -> Pagination {
        let state = self.state.borrow();
        Pagination::new(state.results.page, state.results.total_pages)
    }

    /// Forget the active search and its results.
    pub fn clear(&self) {
        *self.state.borrow_mut() = SearchState::default();
    }
}
