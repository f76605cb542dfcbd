//! Access code domain module.
//!
//! Read-side model of the codes managed by the remote code service, plus
//! the pieces of the admin console that run locally: creation validation,
//! status filtering, free-text search and pagination.

mod code;
mod draft;
mod filter;
mod pagination;

pub use code::{
    AccessCode, CodeCatalog, CodeDetail, CodeFormat, CodeStatistics, CodeType, UsageRecord,
};
pub use draft::{
    CodeDraft, NewCode, CODE_LENGTH_RANGE, EXPIRES_IN_HOURS_RANGE, USAGE_LIMIT_RANGE,
};
pub use filter::{matches_search, select, CodeFilter};
pub use pagination::{clamp_page, page_of, total_pages, Page, PAGE_SIZE};
