//! Membership dashboard state: tabs, document search and notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::member::{MemberDocument, Notification, UserProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Overview,
    Documents,
    Notifications,
    Settings,
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Documents => "documents",
            DashboardTab::Notifications => "notifications",
            DashboardTab::Settings => "settings",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub tab: DashboardTab,
    pub profile: Option<UserProfile>,
    documents: Vec<MemberDocument>,
    notifications: Vec<Notification>,
    search: String,
}

impl Dashboard {
    pub fn new(
        profile: Option<UserProfile>,
        documents: Vec<MemberDocument>,
        notifications: Vec<Notification>,
    ) -> Self {
        Dashboard {
            profile,
            documents,
            notifications,
            ..Default::default()
        }
    }

    /// Welcome line, e.g. "Welcome back, Ada!".
    pub fn greeting(&self) -> String {
        match self.profile {
            Some(ref p) => format!("Welcome back, {}!", p.name),
            None => "Welcome back!".to_string(),
        }
    }

    pub fn membership_line(&self) -> Option<String> {
        self.profile.as_ref().map(|p| {
            format!(
                "Your membership is currently {}",
                p.membership_status.to_lowercase()
            )
        })
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Documents whose title or type contains the search term, ignoring case.
    pub fn filtered_documents(&self) -> Vec<&MemberDocument> {
        let term = self.search.to_lowercase();
        self.documents
            .iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&term) || d.kind.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Returns false if no notification has that id.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }
}
