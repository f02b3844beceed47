//! Which seminar screen is visible.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seminar::Seminar;

/// List tab. Kept separately from [`View`] so that leaving a detail view
/// restores the tab the user was on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Upcoming,
    Past,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Upcoming => write!(f, "upcoming"),
            Tab::Past => write!(f, "past"),
        }
    }
}

/// The visible seminar screen. Exactly one at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    List,
    Details(Seminar),
    RegistrationForm(Seminar),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::List => "list",
            View::Details(_) => "details",
            View::RegistrationForm(_) => "registration form",
        }
    }

    /// The seminar this view is about, if any.
    pub fn seminar(&self) -> Option<&Seminar> {
        match self {
            View::List => None,
            View::Details(s) | View::RegistrationForm(s) => Some(s),
        }
    }
}
