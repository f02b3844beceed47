//! Seminar screen state: list/details/registration form, the active tab,
//! and reconciliation of user actions with the gateway.
//!
//! Every asynchronous operation is split into a `begin_*` step that hands out
//! a ticket and a `finish_*` step that applies the result. A result is applied
//! only while its ticket is still current:
//! - a fetch is current until another fetch is started (last issued wins)
//! - a mutation is current until the view changes
//!
//! Tracker updates always follow the server outcome, current or not.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::context::AppContext;
use crate::error::{GatewayError, GatewayResult, Mutation, SeminarError, SeminarResult};
use crate::gateway::{Page, export_filename};
use crate::partition::{Partition, partition};
use crate::rating::Rating;
use crate::registration::RegistrationForm;
use crate::seminar::{Seminar, SeminarId};
use crate::tracker::RegistrationTracker;
use crate::view::{Tab, View};

/// Handed out when a fetch starts. Carries the reference instant the
/// fetched batch will be partitioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    reference: DateTime<Utc>,
}

impl FetchTicket {
    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }
}

/// Snapshot of the view a mutation was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
}

pub struct SeminarController<'a> {
    ctx: &'a AppContext,
    page: Page,
    view: View,
    tab: Tab,
    tracker: RegistrationTracker,
    partition: Option<Partition>,
    loading: bool,
    banner: Option<String>,
    inline_error: Option<String>,
    fetch_generation: u64,
    view_generation: u64,
}

impl<'a> SeminarController<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        SeminarController {
            ctx,
            page: Page {
                limit: ctx.config().page_size,
                offset: 0,
            },
            view: View::List,
            tab: Tab::Upcoming,
            tracker: RegistrationTracker::new(),
            partition: None,
            loading: false,
            banner: None,
            inline_error: None,
            fetch_generation: 0,
            view_generation: 0,
        }
    }

    // ACCESSORS:

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    pub fn tracker(&self) -> &RegistrationTracker {
        &self.tracker
    }

    pub fn is_registered(&self, id: SeminarId) -> bool {
        self.tracker.is_registered(id)
    }

    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// Seminars of the active tab; empty until a fetch succeeds.
    pub fn visible(&self) -> &[Seminar] {
        match self.partition {
            Some(ref p) => p.seminars(self.tab),
            None => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Message of the last failed action on the current view.
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    // VIEW TRANSITIONS:

    fn transition(&mut self, view: View) {
        tracing::debug!(from = self.view.name(), to = view.name(), "view transition");
        self.view = view;
        self.view_generation += 1;
        self.inline_error = None;
    }

    fn invalid(&self, action: &'static str) -> SeminarError {
        SeminarError::InvalidTransition {
            action,
            view: self.view.name(),
        }
    }

    /// Switch list tab. Allowed from any view; the list shows it on return.
    pub fn set_tab(&mut self, tab: Tab) {
        tracing::debug!(%tab, "tab switch");
        self.tab = tab;
    }

    /// List → Details.
    pub fn select(&mut self, seminar: Seminar) -> SeminarResult<()> {
        match self.view {
            View::List => {
                self.transition(View::Details(seminar));
                Ok(())
            }
            _ => Err(self.invalid("select a seminar")),
        }
    }

    /// Select a seminar of the loaded partition by id.
    pub fn select_id(&mut self, id: SeminarId) -> SeminarResult<()> {
        let seminar = self
            .partition
            .as_ref()
            .and_then(|p| p.find(id))
            .cloned()
            .ok_or(SeminarError::NotFound(id))?;
        self.select(seminar)
    }

    /// Back to the list. Leaving the form discards whatever was typed.
    pub fn close(&mut self) {
        if self.view != View::List {
            self.transition(View::List);
        }
    }

    /// Details → RegistrationForm, unless this session already registered.
    pub fn begin_registration(&mut self) -> SeminarResult<()> {
        let seminar = match self.view {
            View::Details(ref s) => s.clone(),
            _ => return Err(self.invalid("start a registration")),
        };

        if self.tracker.is_registered(seminar.id) {
            return Err(SeminarError::AlreadyRegistered(seminar.id));
        }

        self.transition(View::RegistrationForm(seminar));
        Ok(())
    }

    /// RegistrationForm → List.
    ///
    /// `Some(id)` means the registration went through: the id is tracked and
    /// a refetch ticket is returned. `None` means the user gave up.
    pub fn complete_registration(
        &mut self,
        id: Option<SeminarId>,
    ) -> SeminarResult<Option<FetchTicket>> {
        if !matches!(self.view, View::RegistrationForm(_)) {
            return Err(self.invalid("complete a registration"));
        }

        self.transition(View::List);

        match id {
            Some(id) => {
                self.tracker.mark_registered(id);
                Ok(Some(self.begin_refresh()))
            }
            None => Ok(None),
        }
    }

    pub fn view_ticket(&self) -> ViewTicket {
        ViewTicket {
            generation: self.view_generation,
        }
    }

    pub fn is_current(&self, ticket: ViewTicket) -> bool {
        ticket.generation == self.view_generation
    }

    // FETCHING:

    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.begin_refresh_at(Utc::now())
    }

    /// Start a fetch whose batch will be partitioned against `now`.
    pub fn begin_refresh_at(&mut self, now: DateTime<Utc>) -> FetchTicket {
        self.fetch_generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.fetch_generation,
            reference: now,
        }
    }

    /// Apply a finished fetch. Returns `Ok(false)` if a newer fetch was
    /// started in the meantime and the result was dropped.
    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        result: GatewayResult<Vec<Seminar>>,
    ) -> SeminarResult<bool> {
        if ticket.generation != self.fetch_generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.fetch_generation,
                "discarding stale seminar fetch"
            );
            return Ok(false);
        }

        self.loading = false;

        match result {
            Ok(seminars) => {
                let p = partition(seminars, ticket.reference);
                tracing::debug!(
                    upcoming = p.upcoming.len(),
                    past = p.past.len(),
                    unparseable = p.unparseable.len(),
                    "seminars loaded"
                );
                self.partition = Some(p);
                self.banner = None;
                Ok(true)
            }
            Err(e) => {
                let err = SeminarError::Fetch(e);
                tracing::error!(error = %err, "seminar fetch failed");
                self.partition = None;
                self.banner = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Run the fetch for `ticket` against the gateway.
    pub async fn fetch(&mut self, ticket: FetchTicket) -> SeminarResult<bool> {
        let result = self.ctx.seminars().list_seminars(self.page).await;
        self.finish_refresh(ticket, result)
    }

    pub async fn refresh(&mut self) -> SeminarResult<()> {
        let ticket = self.begin_refresh();
        self.fetch(ticket).await.map(|_| ())
    }

    // MUTATIONS:

    /// Validate the open registration form and start submitting it.
    ///
    /// A missing field is shown inline and nothing is sent.
    pub fn begin_submit(
        &mut self,
        form: &RegistrationForm,
    ) -> SeminarResult<(ViewTicket, SeminarId)> {
        let id = match self.view {
            View::RegistrationForm(ref s) => s.id,
            _ => return Err(self.invalid("submit a registration")),
        };

        if let Err(e) = form.validate() {
            self.inline_error = Some(e.to_string());
            return Err(e);
        }

        Ok((self.view_ticket(), id))
    }

    /// Apply a finished registration.
    ///
    /// While the form is still open, success continues as
    /// [`complete_registration`](Self::complete_registration) and returns its
    /// refetch ticket. If the user has left the form, only the tracker is
    /// updated. On failure the form stays open.
    pub fn finish_submit(
        &mut self,
        ticket: ViewTicket,
        id: SeminarId,
        result: GatewayResult<()>,
    ) -> SeminarResult<Option<FetchTicket>> {
        match result {
            Ok(()) if self.is_current(ticket) => self.complete_registration(Some(id)),
            Ok(()) => {
                tracing::debug!(seminar = %id, "registration finished after view changed");
                self.tracker.mark_registered(id);
                Ok(None)
            }
            Err(source) => Err(self.mutation_failed(ticket, Mutation::Register, id, source)),
        }
    }

    /// Submit the open registration form and refetch on success.
    /// A refetch failure only shows up in the banner.
    pub async fn submit_registration(&mut self, form: &RegistrationForm) -> SeminarResult<()> {
        let (ticket, id) = self.begin_submit(form)?;
        let result = self.ctx.seminars().register(id, form).await;

        if let Some(fetch) = self.finish_submit(ticket, id, result)?
            && let Err(e) = self.fetch(fetch).await
        {
            tracing::warn!(error = %e, "refresh after registration failed");
        }
        Ok(())
    }

    /// Start cancelling the registration of the seminar shown in Details.
    pub fn begin_cancel(&self, id: SeminarId) -> SeminarResult<ViewTicket> {
        match self.view {
            View::Details(ref s) if s.id == id => Ok(self.view_ticket()),
            _ => Err(self.invalid("cancel a registration")),
        }
    }

    /// Apply a finished cancellation. The view never changes.
    pub fn finish_cancel(
        &mut self,
        ticket: ViewTicket,
        id: SeminarId,
        result: GatewayResult<()>,
    ) -> SeminarResult<()> {
        match result {
            Ok(()) => {
                self.tracker.mark_unregistered(id);
                if self.is_current(ticket) {
                    self.inline_error = None;
                }
                Ok(())
            }
            Err(source) => Err(self.mutation_failed(ticket, Mutation::Cancel, id, source)),
        }
    }

    pub async fn cancel_registration(&mut self, id: SeminarId) -> SeminarResult<()> {
        let ticket = self.begin_cancel(id)?;
        let result = self.ctx.seminars().cancel_registration(id).await;
        self.finish_cancel(ticket, id, result)
    }

    /// Send a rating. The gateway's response is returned untouched.
    pub async fn submit_rating(
        &mut self,
        id: SeminarId,
        rating: &Rating,
    ) -> SeminarResult<serde_json::Value> {
        let ticket = self.view_ticket();
        let result = self.ctx.seminars().add_rating(id, rating).await;
        result.map_err(|source| self.mutation_failed(ticket, Mutation::Rate, id, source))
    }

    fn mutation_failed(
        &mut self,
        ticket: ViewTicket,
        action: Mutation,
        id: SeminarId,
        source: GatewayError,
    ) -> SeminarError {
        let err = SeminarError::Mutation { action, id, source };
        tracing::error!(error = %err, "seminar action failed");
        if self.is_current(ticket) {
            self.inline_error = Some(err.to_string());
        }
        err
    }

    // EXPORT:

    /// Save the seminar's calendar file into the download directory.
    ///
    /// Failures are logged and yield `None`; nothing else changes.
    pub async fn export_calendar(&self, id: SeminarId) -> Option<PathBuf> {
        let bytes = match self.ctx.seminars().export_calendar(id).await {
            Ok(bytes) => bytes,
            Err(source) => {
                let err = SeminarError::Export { id, source };
                tracing::warn!(error = %err, "calendar export failed");
                return None;
            }
        };

        let dir = &self.ctx.config().download_dir;
        let path = dir.join(export_filename(id));

        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, &bytes).await
        }
        .await;

        match written {
            Ok(()) => {
                tracing::info!(path = %path.display(), "calendar exported");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not save calendar file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::FixtureGateway;
    use crate::gateway::fixture::FixtureOp;
    use crate::rating::RatingScore;
    use crate::seminar::make_seminar;
    use chrono::TimeZone;
    use std::sync::Arc;

    const PAST: u64 = 1;
    const UPCOMING: u64 = 2;

    async fn setup_in(download_dir: PathBuf) -> (Arc<FixtureGateway>, AppContext) {
        let gateway = Arc::new(FixtureGateway::with_seminars(vec![
            make_seminar(PAST, "2020-01-01"),
            make_seminar(UPCOMING, "2099-01-01"),
        ]));
        let config = Config {
            download_dir,
            ..Config::default()
        };
        let ctx = AppContext::start(config, gateway.clone()).await;
        (gateway, ctx)
    }

    async fn setup() -> (Arc<FixtureGateway>, AppContext) {
        setup_in(std::env::temp_dir()).await
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Ada Byron".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        }
    }

    fn visible_ids(ctl: &SeminarController<'_>) -> Vec<u64> {
        ctl.visible().iter().map(|s| s.id.0).collect()
    }

    #[tokio::test]
    async fn test_initial_state() {
        let (_, ctx) = setup().await;
        let ctl = ctx.seminar_controller();

        assert_eq!(ctl.view(), &View::List);
        assert_eq!(ctl.active_tab(), Tab::Upcoming);
        assert!(ctl.visible().is_empty());
        assert!(ctl.tracker().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_partitions_by_tab() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        ctl.refresh().await.unwrap();
        assert!(!ctl.is_loading());
        assert_eq!(visible_ids(&ctl), vec![UPCOMING]);

        ctl.set_tab(Tab::Past);
        assert_eq!(visible_ids(&ctl), vec![PAST]);
    }

    #[tokio::test]
    async fn test_select_then_close_keeps_tab() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();

        ctl.set_tab(Tab::Past);
        ctl.select_id(SeminarId(PAST)).unwrap();
        assert!(matches!(ctl.view(), View::Details(s) if s.id == SeminarId(PAST)));

        ctl.close();
        assert_eq!(ctl.view(), &View::List);
        assert_eq!(ctl.active_tab(), Tab::Past);
    }

    #[tokio::test]
    async fn test_tab_switch_in_details_survives_close() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();

        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.set_tab(Tab::Past);
        ctl.close();

        assert_eq!(ctl.active_tab(), Tab::Past);
    }

    #[tokio::test]
    async fn test_select_outside_list_is_rejected() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        ctl.select(make_seminar(5, "2099-01-01")).unwrap();
        let err = ctl.select(make_seminar(6, "2099-01-01")).unwrap_err();

        assert!(matches!(err, SeminarError::InvalidTransition { view: "details", .. }));
        assert!(matches!(ctl.view(), View::Details(s) if s.id == SeminarId(5)));
    }

    #[tokio::test]
    async fn test_select_unknown_id() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();

        assert!(matches!(
            ctl.select_id(SeminarId(42)),
            Err(SeminarError::NotFound(SeminarId(42)))
        ));
        assert_eq!(ctl.view(), &View::List);
    }

    #[tokio::test]
    async fn test_close_on_list_is_noop() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        let before = ctl.view_ticket();

        ctl.close();

        assert!(ctl.is_current(before));
    }

    #[tokio::test]
    async fn test_begin_registration_twice_keeps_single_form() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();

        ctl.begin_registration().unwrap();
        let form_view = ctl.view().clone();
        let err = ctl.begin_registration().unwrap_err();

        assert!(matches!(err, SeminarError::InvalidTransition { .. }));
        assert_eq!(ctl.view(), &form_view);
    }

    #[tokio::test]
    async fn test_begin_registration_when_registered_is_rejected() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();
        ctl.complete_registration(Some(SeminarId(UPCOMING))).unwrap();

        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        let err = ctl.begin_registration().unwrap_err();

        assert!(matches!(err, SeminarError::AlreadyRegistered(SeminarId(UPCOMING))));
        assert!(matches!(ctl.view(), View::Details(_)));
    }

    #[tokio::test]
    async fn test_complete_registration_with_id_tracks_and_refetches() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        ctl.set_tab(Tab::Past);
        ctl.select_id(SeminarId(PAST)).unwrap();
        ctl.begin_registration().unwrap();

        let ticket = ctl.complete_registration(Some(SeminarId(PAST))).unwrap();

        assert!(ctl.is_registered(SeminarId(PAST)));
        assert_eq!(ctl.view(), &View::List);
        assert_eq!(ctl.active_tab(), Tab::Past);

        let ticket = ticket.expect("successful registration triggers a refetch");
        assert!(ctl.fetch(ticket).await.unwrap());
        assert_eq!(gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_complete_registration_without_id_changes_nothing() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();

        let ticket = ctl.complete_registration(None).unwrap();

        assert!(ticket.is_none());
        assert!(ctl.tracker().is_empty());
        assert_eq!(ctl.view(), &View::List);
        assert_eq!(gateway.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_complete_registration_outside_form_is_rejected() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        assert!(ctl.complete_registration(Some(SeminarId(1))).is_err());
        assert!(ctl.tracker().is_empty());
    }

    #[tokio::test]
    async fn test_submit_registration_success() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.begin_registration().unwrap();

        ctl.submit_registration(&form()).await.unwrap();

        assert_eq!(ctl.view(), &View::List);
        assert!(ctl.is_registered(SeminarId(UPCOMING)));
        assert!(gateway.is_registered(SeminarId(UPCOMING)));
        assert_eq!(gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_submit_registration_missing_field_stays_on_form() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();

        let incomplete = RegistrationForm {
            email: String::new(),
            ..form()
        };
        let err = ctl.submit_registration(&incomplete).await.unwrap_err();

        assert!(matches!(err, SeminarError::MissingField("email")));
        assert!(matches!(ctl.view(), View::RegistrationForm(_)));
        assert!(ctl.inline_error().is_some());
        assert!(!gateway.is_registered(SeminarId(UPCOMING)));
    }

    #[tokio::test]
    async fn test_submit_registration_gateway_failure_stays_on_form() {
        let (gateway, ctx) = setup().await;
        gateway.fail(FixtureOp::Register);
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();

        let err = ctl.submit_registration(&form()).await.unwrap_err();

        assert!(matches!(
            err,
            SeminarError::Mutation {
                action: Mutation::Register,
                ..
            }
        ));
        assert!(matches!(ctl.view(), View::RegistrationForm(_)));
        assert!(!ctl.is_registered(SeminarId(UPCOMING)));
        assert_eq!(gateway.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_registration_finishing_after_form_closed_only_tracks() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.begin_registration().unwrap();

        let (ticket, id) = ctl.begin_submit(&form()).unwrap();
        ctl.close();
        ctl.select_id(SeminarId(PAST)).unwrap();
        let refetch = ctl.finish_submit(ticket, id, Ok(())).unwrap();

        assert!(refetch.is_none());
        assert!(ctl.is_registered(SeminarId(UPCOMING)));
        assert!(matches!(ctl.view(), View::Details(s) if s.id == SeminarId(PAST)));
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_registration_failing_after_form_closed_is_not_shown() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();

        let (ticket, id) = ctl.begin_submit(&form()).unwrap();
        ctl.close();
        let result = ctl.finish_submit(
            ticket,
            id,
            Err(GatewayError::Network("timed out".to_string())),
        );

        assert!(result.is_err());
        assert!(ctl.inline_error().is_none());
        assert!(!ctl.is_registered(SeminarId(UPCOMING)));
        assert_eq!(ctl.view(), &View::List);
    }

    #[tokio::test]
    async fn test_begin_submit_outside_form_is_rejected() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();

        let err = ctl.begin_submit(&form()).unwrap_err();
        assert!(matches!(err, SeminarError::InvalidTransition { view: "details", .. }));
    }

    #[tokio::test]
    async fn test_cancel_registration_success() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.begin_registration().unwrap();
        ctl.submit_registration(&form()).await.unwrap();

        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.cancel_registration(SeminarId(UPCOMING)).await.unwrap();

        assert!(!ctl.is_registered(SeminarId(UPCOMING)));
        assert!(!gateway.is_registered(SeminarId(UPCOMING)));
        assert!(matches!(ctl.view(), View::Details(_)));
    }

    #[tokio::test]
    async fn test_cancel_registration_failure_leaves_state() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        ctl.begin_registration().unwrap();
        ctl.submit_registration(&form()).await.unwrap();
        ctl.select_id(SeminarId(UPCOMING)).unwrap();
        let before = ctl.view().clone();

        gateway.fail(FixtureOp::Cancel);
        let err = ctl.cancel_registration(SeminarId(UPCOMING)).await.unwrap_err();

        assert!(matches!(
            err,
            SeminarError::Mutation {
                action: Mutation::Cancel,
                ..
            }
        ));
        assert!(ctl.is_registered(SeminarId(UPCOMING)));
        assert_eq!(ctl.view(), &before);
        assert!(ctl.inline_error().is_some());
    }

    #[tokio::test]
    async fn test_cancel_requires_details_of_same_seminar() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        assert!(ctl.begin_cancel(SeminarId(UPCOMING)).is_err());

        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        assert!(ctl.begin_cancel(SeminarId(PAST)).is_err());
        assert!(ctl.begin_cancel(SeminarId(UPCOMING)).is_ok());
    }

    #[tokio::test]
    async fn test_stale_cancel_error_is_not_shown() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();

        let ticket = ctl.begin_cancel(SeminarId(UPCOMING)).unwrap();
        ctl.close();
        let result = ctl.finish_cancel(
            ticket,
            SeminarId(UPCOMING),
            Err(GatewayError::Network("timed out".to_string())),
        );

        assert!(result.is_err());
        assert!(ctl.inline_error().is_none());
        assert_eq!(ctl.view(), &View::List);
    }

    #[tokio::test]
    async fn test_stale_cancel_success_still_updates_tracker() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        ctl.begin_registration().unwrap();
        ctl.complete_registration(Some(SeminarId(UPCOMING))).unwrap();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();

        let ticket = ctl.begin_cancel(SeminarId(UPCOMING)).unwrap();
        ctl.close();
        ctl.finish_cancel(ticket, SeminarId(UPCOMING), Ok(())).unwrap();

        assert!(!ctl.is_registered(SeminarId(UPCOMING)));
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        let first = ctl.begin_refresh();
        let second = ctl.begin_refresh();

        assert!(ctl
            .finish_refresh(second, Ok(vec![make_seminar(10, "2099-01-01")]))
            .unwrap());
        assert!(!ctl
            .finish_refresh(first, Ok(vec![make_seminar(11, "2099-01-01")]))
            .unwrap());

        assert_eq!(visible_ids(&ctl), vec![10]);
    }

    #[tokio::test]
    async fn test_stale_fetch_failure_does_not_clear_list() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();

        let first = ctl.begin_refresh();
        let second = ctl.begin_refresh();
        ctl.finish_refresh(second, Ok(vec![make_seminar(10, "2099-01-01")]))
            .unwrap();
        let applied = ctl
            .finish_refresh(first, Err(GatewayError::Network("reset".to_string())))
            .unwrap();

        assert!(!applied);
        assert!(ctl.banner().is_none());
        assert_eq!(visible_ids(&ctl), vec![10]);
    }

    #[tokio::test]
    async fn test_fetch_uses_reference_from_ticket() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        let reference = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let ticket = ctl.begin_refresh_at(reference);
        assert_eq!(ticket.reference(), reference);
        ctl.finish_refresh(
            ticket,
            Ok(vec![
                make_seminar(1, "2023-12-31"),
                make_seminar(2, "2024-01-01"),
            ]),
        )
        .unwrap();

        let p = ctl.partition().unwrap();
        assert_eq!(p.reference, reference);
        assert_eq!(p.past[0].id, SeminarId(1));
        assert_eq!(p.upcoming[0].id, SeminarId(2));
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_banner_and_clears_list() {
        let (gateway, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        ctl.refresh().await.unwrap();
        assert!(!ctl.visible().is_empty());

        gateway.fail(FixtureOp::List);
        let err = ctl.refresh().await.unwrap_err();

        assert!(matches!(err, SeminarError::Fetch(_)));
        assert!(ctl.banner().is_some());
        assert!(ctl.partition().is_none());
        assert!(ctl.visible().is_empty());
        assert!(!ctl.is_loading());

        gateway.recover(FixtureOp::List);
        ctl.refresh().await.unwrap();
        assert!(ctl.banner().is_none());
    }

    #[tokio::test]
    async fn test_rating_returns_gateway_payload() {
        let (_, ctx) = setup().await;
        let mut ctl = ctx.seminar_controller();
        let rating = Rating {
            skill: Some(RatingScore::new(3).unwrap()),
            quality: Some(RatingScore::new(4).unwrap()),
            usefulness: Some(RatingScore::new(5).unwrap()),
        };

        let response = ctl.submit_rating(SeminarId(PAST), &rating).await.unwrap();

        assert_eq!(
            response,
            serde_json::json!({
                "seminarId": PAST,
                "rating": { "skill": 3, "quality": 4, "usefulness": 5 }
            })
        );
    }

    #[tokio::test]
    async fn test_rating_failure_is_mutation_error() {
        let (gateway, ctx) = setup().await;
        gateway.fail(FixtureOp::Rate);
        let mut ctl = ctx.seminar_controller();

        let err = ctl
            .submit_rating(SeminarId(PAST), &Rating::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SeminarError::Mutation {
                action: Mutation::Rate,
                ..
            }
        ));
        assert_eq!(ctl.view(), &View::List);
    }

    #[tokio::test]
    async fn test_export_writes_file_without_changing_view() {
        let dir = tempfile::tempdir().unwrap();
        let (_, ctx) = setup_in(dir.path().join("downloads")).await;
        let mut ctl = ctx.seminar_controller();
        ctl.select(make_seminar(UPCOMING, "2099-01-01")).unwrap();
        let ticket = ctl.view_ticket();

        let path = ctl.export_calendar(SeminarId(UPCOMING)).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "seminar-2.ics");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("BEGIN:VEVENT"));
        assert!(ctl.is_current(ticket));
    }

    #[tokio::test]
    async fn test_export_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let (gateway, ctx) = setup_in(dir.path().to_path_buf()).await;
        gateway.fail(FixtureOp::Export);
        let ctl = ctx.seminar_controller();

        assert!(ctl.export_calendar(SeminarId(UPCOMING)).await.is_none());
        assert!(!dir.path().join("seminar-2.ics").exists());
        assert_eq!(ctl.view(), &View::List);
    }
}
