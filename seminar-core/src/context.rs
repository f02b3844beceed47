//! Per-session application context.
//!
//! Built once when a member session starts and consumed by [`AppContext::logout`].
//! Controllers borrow the context, so a session cannot be torn down while
//! one of its screens is still alive.

use std::sync::Arc;

use crate::config::Config;
use crate::controller::SeminarController;
use crate::dashboard::Dashboard;
use crate::error::{SeminarError, SeminarResult};
use crate::gateway::{MemberGateway, SeminarGateway};
use crate::member::UserProfile;

pub struct AppContext {
    config: Config,
    seminars: Arc<dyn SeminarGateway>,
    members: Arc<dyn MemberGateway>,
    profile: Option<UserProfile>,
}

impl AppContext {
    /// Start a session against `gateway`.
    ///
    /// The member profile is fetched up front. If that fails the session
    /// starts without one.
    pub async fn start<G>(config: Config, gateway: Arc<G>) -> Self
    where
        G: SeminarGateway + MemberGateway + 'static,
    {
        let profile = match gateway.fetch_profile().await {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(error = %e, "could not load member profile");
                None
            }
        };

        tracing::info!(signed_in = profile.is_some(), "session started");

        AppContext {
            config,
            seminars: gateway.clone(),
            members: gateway,
            profile,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn seminars(&self) -> &dyn SeminarGateway {
        self.seminars.as_ref()
    }

    pub fn seminar_controller(&self) -> SeminarController<'_> {
        SeminarController::new(self)
    }

    /// Load dashboard lists. Any failure aborts the whole load.
    pub async fn dashboard(&self) -> SeminarResult<Dashboard> {
        let documents = self
            .members
            .list_documents()
            .await
            .map_err(SeminarError::Fetch)?;
        let notifications = self
            .members
            .list_notifications()
            .await
            .map_err(SeminarError::Fetch)?;

        Ok(Dashboard::new(self.profile.clone(), documents, notifications))
    }

    /// End the session. Everything session-scoped is dropped with the context.
    pub fn logout(self) {
        tracing::info!("session ended");
    }
}
