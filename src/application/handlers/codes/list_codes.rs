//! ListCodesHandler - Query handler for the filtered, paginated code listing.

use std::sync::Arc;

use crate::domain::access_code::{
    clamp_page, page_of, select, total_pages, AccessCode, CodeFilter, CodeStatistics, Page,
};
use crate::ports::CodeRegistry;

use super::{AdminOperation, CodeAdminError};

/// Query for the code listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCodesQuery {
    pub filter: CodeFilter,
    /// Free-text search over code, email and purpose.
    pub search: String,
    /// Requested 1-based page; clamped into range.
    pub page: usize,
}

impl Default for ListCodesQuery {
    fn default() -> Self {
        Self {
            filter: CodeFilter::All,
            search: String::new(),
            page: 1,
        }
    }
}

/// A fetched listing after filtering and search.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeListing {
    /// Counters over every code, unaffected by filter or search.
    pub statistics: CodeStatistics,
    pub filter: CodeFilter,
    pub search: String,
    /// Codes that passed the filter and search, in service order.
    pub matches: Vec<AccessCode>,
    page: usize,
}

impl CodeListing {
    pub fn new(
        statistics: CodeStatistics,
        filter: CodeFilter,
        search: String,
        matches: Vec<AccessCode>,
        page: usize,
    ) -> Self {
        let page = clamp_page(page, matches.len());
        Self {
            statistics,
            filter,
            search,
            matches,
            page,
        }
    }

    /// Current 1-based page number.
    pub fn page_number(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.matches.len())
    }

    /// The codes on the current page.
    pub fn current_page(&self) -> Page<'_, AccessCode> {
        page_of(&self.matches, self.page)
    }

    /// Move to another page, clamped into range.
    pub fn go_to(&mut self, page: usize) {
        self.page = clamp_page(page, self.matches.len());
    }
}

/// Handler for listing codes.
///
/// The service returns every code; filtering, search and pagination run
/// locally on the result.
pub struct ListCodesHandler {
    registry: Arc<dyn CodeRegistry>,
}

impl ListCodesHandler {
    pub fn new(registry: Arc<dyn CodeRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: ListCodesQuery) -> Result<CodeListing, CodeAdminError> {
        let catalog = self
            .registry
            .list()
            .await
            .map_err(|e| CodeAdminError::from_registry(AdminOperation::List, e))?;

        let matches = select(catalog.codes, query.filter, &query.search);
        tracing::debug!(
            filter = %query.filter,
            matches = matches.len(),
            "Code listing fetched"
        );

        Ok(CodeListing::new(
            catalog.statistics,
            query.filter,
            query.search,
            matches,
            query.page,
        ))
    }
}
