//! Contact details submitted with a seminar registration.

use serde::{Deserialize, Serialize};

use crate::error::{SeminarError, SeminarResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub dietary_requirements: String,
    #[serde(default)]
    pub special_requests: String,
}

impl RegistrationForm {
    /// Presence check for the required fields. Anything stricter is up to the server.
    pub fn validate(&self) -> SeminarResult<()> {
        if self.name.trim().is_empty() {
            return Err(SeminarError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(SeminarError::MissingField("email"));
        }
        Ok(())
    }
}
