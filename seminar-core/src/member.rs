//! Member account records shown on the dashboard.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// e.g. "Active", "Expired"; interpreted server-side
    pub membership_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDocument {
    pub id: u64,
    pub title: String,
    /// File type label, e.g. "PDF"
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub date: String,
    #[serde(default)]
    pub read: bool,
}
