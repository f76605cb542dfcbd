//! AdminConsole - State reducer for the access code admin console.
//!
//! Wraps the code handlers and folds each response into a `ConsoleState`:
//! the current listing, the selected code and the last notice. Every
//! method is one user action; the last response wins.

use std::sync::Arc;

use crate::domain::access_code::{CodeDetail, CodeDraft, CodeFilter};
use crate::domain::foundation::Timestamp;
use crate::ports::{CodeRegistry, Confirmer};

use super::handlers::admin::{AdminSession, AdminSessionError};
use super::handlers::codes::{
    CodeAdminError, CodeListing, CreateCodeCommand, CreateCodeHandler, CreateCodeResult,
    DeleteCodeCommand, DeleteCodeHandler, DeleteOutcome, GetCodeDetailHandler,
    GetCodeDetailQuery, ListCodesHandler, ListCodesQuery, UpdateCodeStatusCommand,
    UpdateCodeStatusHandler, UpdateCodeStatusResult,
};

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short message shown to the operator after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Everything the console displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleState {
    pub filter: CodeFilter,
    pub search: String,
    /// Last successfully fetched listing, if any.
    pub listing: Option<CodeListing>,
    /// Last successfully fetched detail, if any.
    pub selected: Option<CodeDetail>,
    pub notice: Option<Notice>,
}

/// The admin console.
pub struct AdminConsole {
    create_handler: CreateCodeHandler,
    list_handler: ListCodesHandler,
    detail_handler: GetCodeDetailHandler,
    update_handler: UpdateCodeStatusHandler,
    delete_handler: DeleteCodeHandler,
    state: ConsoleState,
}

impl AdminConsole {
    /// Opens the console. Fails with `NotLoggedIn` unless an admin session
    /// is active.
    pub async fn open(
        session: &AdminSession,
        registry: Arc<dyn CodeRegistry>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Result<Self, AdminSessionError> {
        session.require().await?;

        Ok(Self {
            create_handler: CreateCodeHandler::new(registry.clone()),
            list_handler: ListCodesHandler::new(registry.clone()),
            detail_handler: GetCodeDetailHandler::new(registry.clone()),
            update_handler: UpdateCodeStatusHandler::new(registry.clone()),
            delete_handler: DeleteCodeHandler::new(registry, confirmer),
            state: ConsoleState::default(),
        })
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.state.notice.as_ref()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Listing
    // ════════════════════════════════════════════════════════════════════════════

    /// Fetch the listing with the current filter and search, keeping the
    /// current page where possible. On failure the previous listing stays.
    pub async fn refresh(&mut self) -> Result<&CodeListing, CodeAdminError> {
        let page = self
            .state
            .listing
            .as_ref()
            .map_or(1, CodeListing::page_number);
        self.fetch(page).await
    }

    /// Change the status filter and fetch from the first page.
    pub async fn set_filter(&mut self, filter: CodeFilter) -> Result<&CodeListing, CodeAdminError> {
        self.state.filter = filter;
        self.fetch(1).await
    }

    /// Change the search text and fetch from the first page.
    pub async fn set_search(
        &mut self,
        search: impl Into<String>,
    ) -> Result<&CodeListing, CodeAdminError> {
        self.state.search = search.into();
        self.fetch(1).await
    }

    /// Replace both filter and search and fetch from the first page.
    pub async fn set_query(
        &mut self,
        filter: CodeFilter,
        search: impl Into<String>,
    ) -> Result<&CodeListing, CodeAdminError> {
        self.state.filter = filter;
        self.state.search = search.into();
        self.fetch(1).await
    }

    /// Move the displayed listing to another page. Nothing is fetched.
    pub fn go_to_page(&mut self, page: usize) {
        if let Some(listing) = self.state.listing.as_mut() {
            listing.go_to(page);
        }
    }

    async fn fetch(&mut self, page: usize) -> Result<&CodeListing, CodeAdminError> {
        match self.query_listing(page).await {
            Ok(listing) => Ok(self.state.listing.insert(listing)),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn query_listing(&self, page: usize) -> Result<CodeListing, CodeAdminError> {
        let query = ListCodesQuery {
            filter: self.state.filter,
            search: self.state.search.clone(),
            page,
        };
        self.list_handler.handle(query).await
    }

    /// Refetch after a successful mutation, but only if a listing is shown.
    /// A failure is logged and leaves the mutation's notice in place.
    async fn refresh_if_displayed(&mut self) {
        let Some(page) = self.state.listing.as_ref().map(CodeListing::page_number) else {
            return;
        };
        match self.query_listing(page).await {
            Ok(listing) => self.state.listing = Some(listing),
            Err(e) => tracing::warn!(error = %e, "Listing refresh after mutation failed"),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════

    /// Create a code from `draft`.
    pub async fn create(
        &mut self,
        draft: CodeDraft,
        now: Timestamp,
    ) -> Result<CreateCodeResult, CodeAdminError> {
        match self
            .create_handler
            .handle(CreateCodeCommand { draft, now })
            .await
        {
            Ok(result) => {
                self.succeed(format!("Code berhasil dibuat: {}", result.code.code));
                self.refresh_if_displayed().await;
                Ok(result)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Activate or deactivate a code.
    pub async fn set_active(
        &mut self,
        code: &str,
        email: &str,
        is_active: bool,
    ) -> Result<UpdateCodeStatusResult, CodeAdminError> {
        let cmd = UpdateCodeStatusCommand {
            code: code.to_string(),
            email: email.to_string(),
            is_active,
        };

        match self.update_handler.handle(cmd).await {
            Ok(result) => {
                let verb = if result.is_active {
                    "diaktifkan"
                } else {
                    "dinonaktifkan"
                };
                self.succeed(format!("Code berhasil {}", verb));
                self.refresh_if_displayed().await;
                Ok(result)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Delete a code after the operator confirms. A declined confirmation
    /// changes nothing.
    pub async fn delete(&mut self, code: &str, email: &str) -> Result<DeleteOutcome, CodeAdminError> {
        let cmd = DeleteCodeCommand {
            code: code.to_string(),
            email: email.to_string(),
        };

        match self.delete_handler.handle(cmd).await {
            Ok(DeleteOutcome::Cancelled) => Ok(DeleteOutcome::Cancelled),
            Ok(DeleteOutcome::Deleted { code }) => {
                if self
                    .state
                    .selected
                    .as_ref()
                    .map_or(false, |d| d.code.code == code)
                {
                    self.state.selected = None;
                }
                self.succeed("Code berhasil dihapus");
                self.refresh_if_displayed().await;
                Ok(DeleteOutcome::Deleted { code })
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Detail
    // ════════════════════════════════════════════════════════════════════════════

    /// Fetch and select one code. On failure the previous selection stays.
    pub async fn show_detail(
        &mut self,
        code: &str,
        email: &str,
    ) -> Result<&CodeDetail, CodeAdminError> {
        let query = GetCodeDetailQuery {
            code: code.to_string(),
            email: email.to_string(),
        };

        match self.detail_handler.handle(query).await {
            Ok(detail) => {
                self.succeed("Detail code berhasil dimuat");
                Ok(self.state.selected.insert(detail))
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn succeed(&mut self, message: impl Into<String>) {
        self.state.notice = Some(Notice::success(message));
    }

    fn fail(&mut self, error: &CodeAdminError) {
        tracing::warn!(error = %error, "Admin operation failed");
        self.state.notice = Some(Notice::error(error.user_message()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::console::FixedConfirmer;
    use crate::adapters::storage::InMemoryLocalStore;
    use crate::adapters::wotatokens::InMemoryCodeRegistry;
    use crate::domain::access_code::AccessCode;
    use crate::ports::{keys, RegistryError};

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn logged_in() -> AdminSession {
        AdminSession::new(Arc::new(InMemoryLocalStore::with_entries([(
            keys::ADMIN_LOGIN,
            r#"{"isLoggedIn":true}"#,
        )])))
    }

    fn seeded(n: usize) -> Arc<InMemoryCodeRegistry> {
        Arc::new(InMemoryCodeRegistry::with_codes((0..n).map(|i| AccessCode {
            code: format!("CODE{:04}", i),
            email: "owner@example.com".into(),
            purpose: "Theater".into(),
            is_active: true,
            ..Default::default()
        })))
    }

    async fn console(registry: Arc<InMemoryCodeRegistry>, confirm: bool) -> AdminConsole {
        let confirmer = if confirm {
            FixedConfirmer::accepting()
        } else {
            FixedConfirmer::declining()
        };
        AdminConsole::open(&logged_in(), registry, Arc::new(confirmer))
            .await
            .unwrap()
    }

    fn now() -> Timestamp {
        Timestamp::parse_lenient("2024-05-01T12:00:00Z").unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Session Gate
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn refuses_to_open_without_login() {
        let session = AdminSession::new(Arc::new(InMemoryLocalStore::new()));

        let result = AdminConsole::open(
            &session,
            seeded(1),
            Arc::new(FixedConfirmer::accepting()),
        )
        .await;

        assert!(matches!(result, Err(AdminSessionError::NotLoggedIn)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Listing
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn refresh_populates_listing_without_notice() {
        let mut console = console(seeded(3), true).await;

        let listing = console.refresh().await.unwrap();

        assert_eq!(listing.matches.len(), 3);
        assert!(console.notice().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_listing() {
        let registry = seeded(3);
        let mut console = console(registry.clone(), true).await;
        console.refresh().await.unwrap();

        registry.fail_next("list", RegistryError::network("down"));
        assert!(console.refresh().await.is_err());

        assert_eq!(console.state().listing.as_ref().unwrap().matches.len(), 3);
        assert_eq!(
            console.notice(),
            Some(&Notice::error("Terjadi kesalahan saat mengambil data"))
        );
    }

    #[tokio::test]
    async fn filter_and_search_reset_to_first_page() {
        let mut console = console(seeded(25), true).await;
        console.refresh().await.unwrap();
        console.go_to_page(3);
        assert_eq!(console.state().listing.as_ref().unwrap().page_number(), 3);

        let listing = console.set_search("code000").await.unwrap();

        assert_eq!(listing.page_number(), 1);
        assert_eq!(listing.matches.len(), 10);

        let listing = console.set_filter(CodeFilter::Inactive).await.unwrap();
        assert!(listing.matches.is_empty());
        assert_eq!(console.state().search, "code000");
    }

    #[tokio::test]
    async fn set_query_fetches_once() {
        let registry = seeded(12);
        let mut console = console(registry.clone(), true).await;

        let listing = console
            .set_query(CodeFilter::Active, "CODE001")
            .await
            .unwrap();

        assert_eq!(listing.matches.len(), 2);
        assert_eq!(registry.calls_to("list"), 1);
        assert_eq!(console.state().filter, CodeFilter::Active);
    }

    #[tokio::test]
    async fn refresh_keeps_current_page() {
        let mut console = console(seeded(25), true).await;
        console.refresh().await.unwrap();
        console.go_to_page(2);

        let listing = console.refresh().await.unwrap();

        assert_eq!(listing.page_number(), 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_reports_code_and_refreshes_displayed_listing() {
        let registry = seeded(1);
        let mut console = console(registry.clone(), true).await;
        console.refresh().await.unwrap();

        let result = console
            .create(CodeDraft::new("new@example.com", "Birthday"), now())
            .await
            .unwrap();

        assert_eq!(
            console.notice(),
            Some(&Notice::success(format!(
                "Code berhasil dibuat: {}",
                result.code.code
            )))
        );
        assert_eq!(console.state().listing.as_ref().unwrap().matches.len(), 2);
        assert_eq!(registry.calls_to("list"), 2);
    }

    #[tokio::test]
    async fn create_without_displayed_listing_does_not_fetch() {
        let registry = seeded(0);
        let mut console = console(registry.clone(), true).await;

        console
            .create(CodeDraft::new("new@example.com", "Birthday"), now())
            .await
            .unwrap();

        assert_eq!(registry.calls_to("list"), 0);
        assert!(console.state().listing.is_none());
    }

    #[tokio::test]
    async fn invalid_create_sets_error_notice() {
        let registry = seeded(0);
        let mut console = console(registry.clone(), true).await;

        let draft = CodeDraft {
            code_length: 3,
            ..CodeDraft::new("a@b.c", "p")
        };
        assert!(console.create(draft, now()).await.is_err());

        assert!(console.notice().unwrap().is_error());
        assert!(!registry.was_called());
    }

    #[tokio::test]
    async fn set_active_uses_localized_verb() {
        let mut console = console(seeded(1), true).await;

        console
            .set_active("CODE0000", "owner@example.com", false)
            .await
            .unwrap();
        assert_eq!(
            console.notice(),
            Some(&Notice::success("Code berhasil dinonaktifkan"))
        );

        console
            .set_active("CODE0000", "owner@example.com", true)
            .await
            .unwrap();
        assert_eq!(
            console.notice(),
            Some(&Notice::success("Code berhasil diaktifkan"))
        );
    }

    #[tokio::test]
    async fn failed_refresh_after_mutation_keeps_success_notice() {
        let registry = seeded(3);
        let mut console = console(registry.clone(), true).await;
        console.refresh().await.unwrap();

        registry.fail_next("list", RegistryError::network("down"));
        console
            .set_active("CODE0000", "owner@example.com", false)
            .await
            .unwrap();

        assert_eq!(
            console.notice(),
            Some(&Notice::success("Code berhasil dinonaktifkan"))
        );
        assert_eq!(registry.calls_to("list"), 2);
        let listing = console.state().listing.as_ref().unwrap();
        assert_eq!(listing.matches.len(), 3);
        assert!(listing.matches.iter().all(|code| code.is_active));
    }

    #[tokio::test]
    async fn delete_clears_matching_selection_and_refreshes() {
        let registry = seeded(2);
        let mut console = console(registry.clone(), true).await;
        console.refresh().await.unwrap();
        console
            .show_detail("CODE0001", "owner@example.com")
            .await
            .unwrap();

        let outcome = console
            .delete("CODE0001", "owner@example.com")
            .await
            .unwrap();

        assert!(matches!(outcome, DeleteOutcome::Deleted { .. }));
        assert!(console.state().selected.is_none());
        assert_eq!(console.state().listing.as_ref().unwrap().matches.len(), 1);
        assert_eq!(
            console.notice(),
            Some(&Notice::success("Code berhasil dihapus"))
        );
    }

    #[tokio::test]
    async fn declined_delete_changes_nothing() {
        let registry = seeded(2);
        let mut console = console(registry.clone(), false).await;

        let outcome = console
            .delete("CODE0001", "owner@example.com")
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(!registry.was_called());
        assert!(console.notice().is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Detail
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn failed_detail_keeps_previous_selection() {
        let mut console = console(seeded(2), true).await;
        console
            .show_detail("CODE0000", "owner@example.com")
            .await
            .unwrap();

        let result = console.show_detail("CODE0001", "wrong@example.com").await;

        assert!(result.is_err());
        assert_eq!(
            console.state().selected.as_ref().unwrap().code.code,
            "CODE0000"
        );
        assert_eq!(
            console.notice(),
            Some(&Notice::error("Code tidak ditemukan atau email tidak cocok"))
        );
    }
}
