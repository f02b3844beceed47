//! Session-local record of seminars this session registered for.

use std::collections::HashSet;

use crate::seminar::SeminarId;

/// In-memory set of registered seminar ids.
///
/// Lives as long as the controller that owns it and is never persisted.
/// It is not reconciled with registration status returned by the server.
#[derive(Debug, Default, Clone)]
pub struct RegistrationTracker {
    registered: HashSet<SeminarId>,
}

impl RegistrationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_registered(&self, id: SeminarId) -> bool {
        self.registered.contains(&id)
    }

    pub fn mark_registered(&mut self, id: SeminarId) {
        self.registered.insert(id);
    }

    pub fn mark_unregistered(&mut self, id: SeminarId) {
        self.registered.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
