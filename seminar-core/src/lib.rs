//! Core of the seminars client.
//!
//! - `seminar`, `partition`: seminar records and their upcoming/past split
//! - `controller`, `view`, `tracker`: the seminar screen state machine
//! - `gateway`: the member API boundary (HTTP and fixture implementations)
//! - `context`: session lifecycle shared by every screen
//! - `dashboard`, `member`: membership dashboard lists

pub mod config;
pub mod context;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod ics;
pub mod member;
pub mod partition;
pub mod rating;
pub mod registration;
pub mod seminar;
pub mod tracker;
pub mod view;

pub use context::AppContext;
pub use controller::SeminarController;
pub use error::{GatewayError, SeminarError, SeminarResult};
pub use seminar::{Seminar, SeminarId};
