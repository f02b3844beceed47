//! In-memory gateway backed by fixture data (mock mode).
//!
//! Serves seminars and member records from a JSON file instead of the API,
//! keeps registrations in memory and renders calendar exports locally.
//! Individual operations can be made to fail to exercise error paths.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult, SeminarError, SeminarResult};
use crate::gateway::{MemberGateway, Page, SeminarGateway};
use crate::ics::generate_ics;
use crate::member::{MemberDocument, Notification, UserProfile};
use crate::rating::Rating;
use crate::registration::RegistrationForm;
use crate::seminar::{Seminar, SeminarId};

/// Contents of a fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub seminars: Vec<Seminar>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub documents: Vec<MemberDocument>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Gateway operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureOp {
    List,
    Register,
    Cancel,
    Export,
    Rate,
}

#[derive(Debug, Default)]
pub struct FixtureGateway {
    data: FixtureData,
    registered: Mutex<HashSet<SeminarId>>,
    failing: Mutex<HashSet<FixtureOp>>,
    list_calls: AtomicUsize,
}

impl FixtureGateway {
    pub fn new(data: FixtureData) -> Self {
        FixtureGateway {
            data,
            ..Default::default()
        }
    }

    pub fn with_seminars(seminars: Vec<Seminar>) -> Self {
        Self::new(FixtureData {
            seminars,
            ..Default::default()
        })
    }

    pub fn load(path: &Path) -> SeminarResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let data: FixtureData = serde_json::from_str(&contents).map_err(|e| {
            SeminarError::Serialization(format!("Invalid fixture file {}: {e}", path.display()))
        })?;
        Ok(Self::new(data))
    }

    /// Make every subsequent call of `op` fail with a server error.
    pub fn fail(&self, op: FixtureOp) {
        lock(&self.failing).insert(op);
    }

    pub fn recover(&self, op: FixtureOp) {
        lock(&self.failing).remove(&op);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Server-side registration status (not the client's tracker).
    pub fn is_registered(&self, id: SeminarId) -> bool {
        lock(&self.registered).contains(&id)
    }

    fn check(&self, op: FixtureOp) -> GatewayResult<()> {
        if lock(&self.failing).contains(&op) {
            return Err(GatewayError::Server {
                status: 500,
                message: format!("{:?} failed", op),
            });
        }
        Ok(())
    }

    fn seminar(&self, id: SeminarId) -> GatewayResult<&Seminar> {
        self.data
            .seminars
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| GatewayError::Server {
                status: 404,
                message: format!("Seminar {id} not found"),
            })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SeminarGateway for FixtureGateway {
    async fn list_seminars(&self, page: Page) -> GatewayResult<Vec<Seminar>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(FixtureOp::List)?;

        Ok(self
            .data
            .seminars
            .iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn register(&self, id: SeminarId, _form: &RegistrationForm) -> GatewayResult<()> {
        self.check(FixtureOp::Register)?;
        self.seminar(id)?;

        if !lock(&self.registered).insert(id) {
            return Err(GatewayError::Server {
                status: 409,
                message: "Already registered".to_string(),
            });
        }
        Ok(())
    }

    async fn cancel_registration(&self, id: SeminarId) -> GatewayResult<()> {
        self.check(FixtureOp::Cancel)?;

        if !lock(&self.registered).remove(&id) {
            return Err(GatewayError::Server {
                status: 409,
                message: "Not registered".to_string(),
            });
        }
        Ok(())
    }

    async fn export_calendar(&self, id: SeminarId) -> GatewayResult<Vec<u8>> {
        self.check(FixtureOp::Export)?;
        let ics = generate_ics(self.seminar(id)?).map_err(|e| GatewayError::Server {
            status: 422,
            message: e.to_string(),
        })?;
        Ok(ics.into_bytes())
    }

    async fn add_rating(&self, id: SeminarId, rating: &Rating) -> GatewayResult<serde_json::Value> {
        self.check(FixtureOp::Rate)?;
        self.seminar(id)?;
        Ok(serde_json::json!({ "seminarId": id, "rating": rating }))
    }
}

#[async_trait]
impl MemberGateway for FixtureGateway {
    async fn fetch_profile(&self) -> GatewayResult<UserProfile> {
        self.data.profile.clone().ok_or_else(|| GatewayError::Server {
            status: 401,
            message: "Not signed in".to_string(),
        })
    }

    async fn list_documents(&self) -> GatewayResult<Vec<MemberDocument>> {
        Ok(self.data.documents.clone())
    }

    async fn list_notifications(&self) -> GatewayResult<Vec<Notification>> {
        Ok(self.data.notifications.clone())
    }
}
