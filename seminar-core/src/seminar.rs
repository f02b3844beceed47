//! Seminar records as served by the seminar API.
//!
//! Records are immutable on the client. The only client-side notion of
//! "registered" lives in the [`RegistrationTracker`](crate::tracker::RegistrationTracker).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DateParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeminarId(pub u64);

impl fmt::Display for SeminarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SeminarId {
    fn from(id: u64) -> Self {
        SeminarId(id)
    }
}

/// A scheduled seminar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seminar {
    pub id: SeminarId,
    pub title: String,
    /// Rich-text (HTML) body
    #[serde(default)]
    pub content: String,
    /// ISO date (`2025-03-20`) or date-time as sent by the server
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Host>,
    #[serde(default)]
    pub documents: Vec<SeminarDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
}

/// A downloadable document attached to a seminar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeminarDocument {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub filename: String,
}

impl Seminar {
    /// The instant this seminar is scheduled at, for upcoming/past classification.
    ///
    /// A bare date is midnight UTC of that day, not midnight in the local time
    /// zone. The `time` field is display-only.
    pub fn scheduled_at(&self) -> Result<DateTime<Utc>, DateParseError> {
        parse_scheduled(&self.date).ok_or_else(|| DateParseError {
            id: self.id,
            value: self.date.clone(),
        })
    }

    pub fn host_name(&self) -> &str {
        self.host.as_ref().map(|h| h.name.as_str()).unwrap_or("Unknown")
    }

    /// Date label, preferring the server-formatted one (e.g. "March 20, 2025").
    pub fn date_label(&self) -> String {
        if let Some(ref formatted) = self.formatted_date {
            return formatted.clone();
        }
        match self.calendar_date() {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => self.date.clone(),
        }
    }

    /// Day of the seminar as written by the server. An explicit offset keeps
    /// its own calendar day instead of the UTC one.
    fn calendar_date(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(self.date.trim()) {
            return Some(dt.date_naive());
        }
        self.scheduled_at().ok().map(|at| at.date_naive())
    }

    pub fn time_label(&self) -> &str {
        self.formatted_time.as_deref().unwrap_or(&self.time)
    }

    /// The rich-text body as plain text, with entities decoded.
    pub fn plain_content(&self) -> String {
        crate::ics::html_to_text(&self.content)
    }
}

fn parse_scheduled(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
pub(crate) fn make_seminar(id: u64, date: &str) -> Seminar {
    Seminar {
        id: SeminarId(id),
        title: format!("Seminar {id}"),
        content: "<p>Details</p>".to_string(),
        date: date.to_string(),
        time: "10:00".to_string(),
        formatted_date: None,
        formatted_time: None,
        location: "Main Hall".to_string(),
        capacity: Some(40),
        host: Some(Host {
            name: "Dr. Rivera".to_string(),
        }),
        documents: vec![],
        featured_image: None,
    }
}
