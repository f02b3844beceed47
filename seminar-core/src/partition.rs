//! Upcoming/past classification of a fetched batch of seminars.

use chrono::{DateTime, Utc};

use crate::error::DateParseError;
use crate::seminar::{Seminar, SeminarId};
use crate::view::Tab;

/// A fetched batch split against a single reference instant.
///
/// The reference is captured once per fetch. Nothing moves between
/// `upcoming` and `past` until the next fetch produces a new partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub reference: DateTime<Utc>,
    pub upcoming: Vec<Seminar>,
    pub past: Vec<Seminar>,
    /// Records whose date could not be read; they appear in neither list.
    pub unparseable: Vec<(Seminar, DateParseError)>,
}

impl Partition {
    pub fn empty(reference: DateTime<Utc>) -> Self {
        Partition {
            reference,
            upcoming: Vec::new(),
            past: Vec::new(),
            unparseable: Vec::new(),
        }
    }

    pub fn seminars(&self, tab: Tab) -> &[Seminar] {
        match tab {
            Tab::Upcoming => &self.upcoming,
            Tab::Past => &self.past,
        }
    }

    pub fn find(&self, id: SeminarId) -> Option<&Seminar> {
        self.upcoming
            .iter()
            .chain(self.past.iter())
            .find(|s| s.id == id)
    }
}

/// Split seminars into upcoming (not strictly before `now`) and past.
///
/// Input order is preserved within each list.
pub fn partition(seminars: impl IntoIterator<Item = Seminar>, now: DateTime<Utc>) -> Partition {
    let mut result = Partition::empty(now);

    for seminar in seminars {
        match seminar.scheduled_at() {
            Ok(at) if at < now => result.past.push(seminar),
            Ok(_) => result.upcoming.push(seminar),
            Err(e) => {
                tracing::warn!(seminar = %seminar.id, date = %seminar.date, "skipping seminar with unreadable date");
                result.unparseable.push((seminar, e));
            }
        }
    }

    result
}
