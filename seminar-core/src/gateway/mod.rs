//! Boundary to the remote member API.
//!
//! Everything that touches the network goes through these traits, so the
//! controller can be driven against the HTTP API or against fixture data.

pub mod fixture;
pub mod http;

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::member::{MemberDocument, Notification, UserProfile};
use crate::rating::Rating;
use crate::registration::RegistrationForm;
use crate::seminar::{Seminar, SeminarId};

pub use fixture::FixtureGateway;
pub use http::HttpGateway;

/// Window of the seminar listing to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: 50,
            offset: 0,
        }
    }
}

/// File name a calendar export is saved under.
pub fn export_filename(id: SeminarId) -> String {
    format!("seminar-{}.ics", id)
}

#[async_trait]
pub trait SeminarGateway: Send + Sync {
    async fn list_seminars(&self, page: Page) -> GatewayResult<Vec<Seminar>>;

    async fn register(&self, id: SeminarId, form: &RegistrationForm) -> GatewayResult<()>;

    async fn cancel_registration(&self, id: SeminarId) -> GatewayResult<()>;

    /// Raw `.ics` content for the seminar.
    async fn export_calendar(&self, id: SeminarId) -> GatewayResult<Vec<u8>>;

    /// Returns the server's rating summary as-is.
    async fn add_rating(&self, id: SeminarId, rating: &Rating) -> GatewayResult<serde_json::Value>;
}

#[async_trait]
pub trait MemberGateway: Send + Sync {
    async fn fetch_profile(&self) -> GatewayResult<UserProfile>;

    async fn list_documents(&self) -> GatewayResult<Vec<MemberDocument>>;

    async fn list_notifications(&self) -> GatewayResult<Vec<Notification>>;
}
